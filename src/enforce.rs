use precis_core::ucd::UnicodeDatabase;
use precis_core::Enforcer;

use crate::args::ArgMatches;
use crate::error::Result;

pub fn command(args: ArgMatches<'_>) -> Result<()> {
    let ucd = args.adapter()?;
    let profile = args.profile(&ucd)?;
    let mut wtr = args.writer();

    let mut total = 0;
    let mut rejected = 0;
    for text in args.values_of_os("string").into_iter().flatten() {
        total += 1;
        let result = match text.to_str() {
            Some(text) => enforce(&profile, text),
            None => Err(precis_core::Error::InvalidArgument("not a string")),
        };
        match result {
            Ok(enforced) => wtr.string(&enforced)?,
            Err(err) => {
                rejected += 1;
                // Keep stdout aligned with the strings that were accepted.
                wtr.flush()?;
                eprintln!("{}", err);
            }
        }
    }
    wtr.flush()?;
    if rejected > 0 {
        return err!(
            "{} rejected {} of {} strings",
            profile.name(),
            rejected,
            total
        );
    }
    Ok(())
}

fn enforce<D: UnicodeDatabase>(
    profile: &Enforcer<'_, D>,
    text: &str,
) -> std::result::Result<String, precis_core::Error> {
    let bytes = profile.enforce_bytes(text.as_bytes())?;
    String::from_utf8(bytes)
        .map_err(|_| precis_core::Error::InvalidArgument("not a string"))
}
