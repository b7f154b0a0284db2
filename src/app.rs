use clap::{App, AppSettings, Arg, SubCommand};

const TEMPLATE: &'static str = "\
{bin} {version}
{about}

USAGE:
    {usage}

SUBCOMMANDS:
{subcommands}

OPTIONS:
{unified}";

const TEMPLATE_SUB: &'static str = "\
{before-help}
USAGE:
    {usage}

ARGS:
{positionals}

OPTIONS:
{unified}";

const ABOUT: &'static str = "
precis enforces PRECIS profiles (RFC 8264, RFC 8265 and RFC 8266) on strings
and reports the PRECIS derived property of Unicode codepoints.

A profile maps a string through width mapping, additional mapping, case
mapping, normalization and directionality stages, and then checks every
codepoint of the result against the IdentifierClass or the FreeformClass.";

const ABOUT_ENFORCE: &'static str = "\
enforce applies a profile to each given string and prints the result, one per
line. Strings rejected by the profile are reported on stderr, along with the
offending codepoint offsets and the reason for the rejection. If any string is
rejected, the exit status is non-zero.

Run 'precis profiles' for the list of profile names. Names are matched without
regard to case, and '_' may be used in place of ':'.
";

const ABOUT_DERIVED_PROPERTY: &'static str = "\
derived-property computes the PRECIS derived property of every codepoint in a
range. By default, each run of codepoints sharing the same property value and
the same deciding rule is printed on one line, e.g.,

    0000-001F DISALLOWED/controls

With --table, only the codepoints with the given property value are printed,
as a codepoint table that can be loaded by precis-set.
";

const ABOUT_IDEMPOTENCE: &'static str = "\
idempotence enforces a profile on every single-codepoint string in a range
and prints each codepoint whose output does not stabilize when the profile is
applied to it again. If any such codepoint is found, the exit status is
non-zero.
";

const ABOUT_PROFILES: &'static str = "\
profiles prints the name of every profile and string class that the other
subcommands accept.
";

/// Build a clap application.
pub fn app() -> App<'static, 'static> {
    // Various common flags and arguments.
    let flag_strict_version = Arg::with_name("strict-version")
        .long("strict-version")
        .global(true)
        .help(
            "Refuse to run if the bundled Unicode database and the bundled \
             codepoint tables implement different versions of Unicode.",
        );
    let flag_verbose = Arg::with_name("verbose")
        .long("verbose")
        .short("v")
        .global(true)
        .multiple(true)
        .help("Log more. Repeat to log even more.");
    let flag_start = Arg::with_name("start")
        .long("start")
        .help("The first codepoint to examine, in hexadecimal.")
        .takes_value(true);
    let flag_end = Arg::with_name("end")
        .long("end")
        .help("The last codepoint to examine, in hexadecimal.")
        .takes_value(true);
    let profile = Arg::with_name("profile")
        .required(true)
        .help("The name of the profile to apply.");

    // Subcommands.
    let cmd_enforce = SubCommand::with_name("enforce")
        .version(clap::crate_version!())
        .template(TEMPLATE_SUB)
        .about("Enforce a profile on strings.")
        .before_help(ABOUT_ENFORCE)
        .arg(profile.clone())
        .arg(
            Arg::with_name("string")
                .required(true)
                .multiple(true)
                .help("The strings to enforce."),
        )
        .arg(Arg::with_name("escape").long("escape").help(
            "Print every codepoint outside of printable ASCII as a \\u{..} \
             escape.",
        ));

    let cmd_derived_property = SubCommand::with_name("derived-property")
        .version(clap::crate_version!())
        .template(TEMPLATE_SUB)
        .about("Compute the PRECIS derived property of codepoints.")
        .before_help(ABOUT_DERIVED_PROPERTY)
        .arg(flag_start.clone())
        .arg(flag_end.clone())
        .arg(
            Arg::with_name("table")
                .long("table")
                .help("Print only the codepoints with this property value.")
                .takes_value(true)
                .possible_values(&[
                    "PVALID",
                    "FREE_PVAL",
                    "DISALLOWED",
                    "UNASSIGNED",
                    "CONTEXTJ",
                    "CONTEXTO",
                ])
                .case_insensitive(true),
        );

    let cmd_idempotence = SubCommand::with_name("idempotence")
        .version(clap::crate_version!())
        .template(TEMPLATE_SUB)
        .about("Find codepoints on which a profile is not idempotent.")
        .before_help(ABOUT_IDEMPOTENCE)
        .arg(profile.clone())
        .arg(flag_start.clone())
        .arg(flag_end.clone());

    let cmd_profiles = SubCommand::with_name("profiles")
        .version(clap::crate_version!())
        .template(TEMPLATE_SUB)
        .about("List the available profiles.")
        .before_help(ABOUT_PROFILES);

    // The actual App.
    App::new("precis")
        .version(clap::crate_version!())
        .about(ABOUT)
        .template(TEMPLATE)
        .max_term_width(100)
        .setting(AppSettings::UnifiedHelpMessage)
        .arg(flag_strict_version)
        .arg(flag_verbose)
        .subcommand(cmd_enforce)
        .subcommand(cmd_derived_property)
        .subcommand(cmd_idempotence)
        .subcommand(cmd_profiles)
}

#[cfg(test)]
mod tests {
    use super::app;

    fn parse(argv: &[&str]) -> clap::Result<clap::ArgMatches<'static>> {
        app().get_matches_from_safe(argv.iter().cloned())
    }

    #[test]
    fn enforce_args() {
        let matches =
            parse(&["precis", "-vv", "enforce", "Nickname", "a", "b"]).unwrap();
        assert_eq!(matches.occurrences_of("verbose"), 2);
        let (name, sub) = matches.subcommand();
        assert_eq!(name, "enforce");
        let sub = sub.unwrap();
        assert_eq!(sub.value_of("profile"), Some("Nickname"));
        let strings: Vec<&str> = sub.values_of("string").unwrap().collect();
        assert_eq!(strings, vec!["a", "b"]);
    }

    #[test]
    fn enforce_needs_a_string() {
        assert!(parse(&["precis", "enforce", "Nickname"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let matches = parse(&["precis", "profiles", "--strict-version"]).unwrap();
        let sub = matches.subcommand_matches("profiles").unwrap();
        assert!(sub.is_present("strict-version"));
    }

    #[test]
    fn table_names() {
        let matches =
            parse(&["precis", "derived-property", "--table", "pvalid"]).unwrap();
        let sub = matches.subcommand_matches("derived-property").unwrap();
        assert_eq!(sub.value_of("table"), Some("pvalid"));
        assert!(parse(&["precis", "derived-property", "--table", "ID_DIS"])
            .is_err());
    }
}
