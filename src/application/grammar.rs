//! # Command Grammar
//!
//! The write-once table of recognized command shapes. Each entry pairs a case-insensitive
//! regex with named capture slots and an extractor that turns the slots into a typed
//! [`Command`]. Matching is first-match-wins in table order.

use regex::{Captures, Regex};

use crate::domain::config::{CommandsConfig, CredentialMode, MalformedVersionPolicy};
use crate::domain::errors::CommandError;
use crate::domain::types::AuthScope;
use crate::strings::messages;

/// A fully extracted command, ready for the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    ListApps { filter: Option<String> },
    AppInfo { app: String },
    Dynos { app: String },
    Releases { app: String },
    Rollback { app: String, version: String },
    Restart { app: String, dyno: Option<String> },
    Migrate { app: String },
    ConfigKeys { app: String },
    ConfigSet { app: String, key: String, value: String },
    ConfigUnset { app: String, key: String },
    Run { runner: String, task: String, app: String },
    Scale {
        app: String,
        process_type: String,
        quantity: u32,
        size: Option<String>,
    },
    Login { token: String },
    Logout,
}

impl Command {
    /// The resource the command names, which decides the role it needs.
    pub fn scope(&self) -> AuthScope {
        match self {
            Command::Help | Command::Login { .. } | Command::Logout => AuthScope::Public,
            Command::ListApps { .. } => AuthScope::Admin,
            Command::AppInfo { app }
            | Command::Dynos { app }
            | Command::Releases { app }
            | Command::Rollback { app, .. }
            | Command::Restart { app, .. }
            | Command::Migrate { app }
            | Command::ConfigKeys { app }
            | Command::ConfigSet { app, .. }
            | Command::ConfigUnset { app, .. }
            | Command::Run { app, .. }
            | Command::Scale { app, .. } => AuthScope::App(app.clone()),
        }
    }
}

/// Outcome of the local checks that run before any remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Proceed,
    /// Drop the command without a reply.
    Ignore,
}

impl Command {
    /// Checks slots against local policy: the runner allow-list and the release
    /// version shape. Needs no credentials and makes no remote call.
    pub fn validate(&self, settings: &CommandsConfig) -> Result<Validation, CommandError> {
        match self {
            Command::Run { runner, .. } => {
                let allowed = settings
                    .runners
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(runner));
                if allowed {
                    Ok(Validation::Proceed)
                } else {
                    Err(CommandError::Rejected(messages::runner_not_allowed(
                        &settings.runners,
                    )))
                }
            }
            Command::Rollback { app, version } if !is_version_label(version) => {
                match settings.malformed_version {
                    MalformedVersionPolicy::Silent => {
                        tracing::debug!(
                            "Ignoring rollback of {} to malformed version {}",
                            app,
                            version
                        );
                        Ok(Validation::Ignore)
                    }
                    MalformedVersionPolicy::Reject => {
                        Err(CommandError::Rejected(messages::malformed_version(version)))
                    }
                }
            }
            _ => Ok(Validation::Proceed),
        }
    }
}

/// `v` followed by digits, e.g. `v352`.
fn is_version_label(version: &str) -> bool {
    version
        .strip_prefix(['v', 'V'])
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}

type Extractor = fn(&Captures) -> Option<Command>;

/// One registered command shape.
pub struct CommandPattern {
    pub name: &'static str,
    pub usage: &'static str,
    matcher: Regex,
    extract: Extractor,
}

impl CommandPattern {
    fn new(
        name: &'static str,
        usage: &'static str,
        pattern: &str,
        extract: Extractor,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            usage,
            matcher: Regex::new(pattern)?,
            extract,
        })
    }

    fn try_match(&self, text: &str) -> Option<Command> {
        self.matcher
            .captures(text)
            .and_then(|caps| (self.extract)(&caps))
    }
}

/// A matched message: the pattern that won, the typed command and who asked.
#[derive(Debug)]
pub struct Invocation<'t> {
    pub pattern: &'t CommandPattern,
    pub command: Command,
    pub requester: String,
}

impl std::fmt::Debug for CommandPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandPattern")
            .field("name", &self.name)
            .field("matcher", &self.matcher.as_str())
            .finish()
    }
}

fn slot(caps: &Captures, name: &str) -> Option<String> {
    caps.name(name).map(|m| m.as_str().trim().to_string())
}

fn required(caps: &Captures, name: &str) -> Option<String> {
    slot(caps, name).filter(|value| !value.is_empty())
}

/// Process-wide command table, built once at startup.
#[derive(Debug)]
pub struct CommandTable {
    bot_name: Option<String>,
    patterns: Vec<CommandPattern>,
}

impl CommandTable {
    pub fn new(bot_name: Option<&str>, mode: CredentialMode) -> Result<Self, regex::Error> {
        let mut patterns = vec![
            CommandPattern::new(
                "help",
                "heroku help - Lists the heroku commands",
                r"(?i)^heroku help\s*$",
                |_| Some(Command::Help),
            )?,
            CommandPattern::new(
                "list apps",
                "heroku list apps <app name filter> - Lists all apps or filtered by the name",
                r"(?i)^heroku list apps(?:\s+(?P<filter>.*))?$",
                |caps| {
                    Some(Command::ListApps {
                        filter: required(caps, "filter"),
                    })
                },
            )?,
            CommandPattern::new(
                "info",
                "heroku info <app> - Returns useful information about the app",
                r"(?i)^heroku info (?P<app>\S+)\s*$",
                |caps| Some(Command::AppInfo { app: required(caps, "app")? }),
            )?,
            CommandPattern::new(
                "dynos",
                "heroku dynos <app> - Lists all dynos and their status",
                r"(?i)^heroku dynos (?P<app>\S+)\s*$",
                |caps| Some(Command::Dynos { app: required(caps, "app")? }),
            )?,
            CommandPattern::new(
                "releases",
                "heroku releases <app> - Latest 10 releases",
                r"(?i)^heroku releases (?:--app\s+)?(?P<app>\S+)\s*$",
                |caps| Some(Command::Releases { app: required(caps, "app")? }),
            )?,
            CommandPattern::new(
                "rollback",
                "heroku rollback <app> <version> - Rollback to a release",
                r"(?i)^heroku rollback (?P<app>\S+)\s+(?P<version>\S+)\s*$",
                |caps| {
                    Some(Command::Rollback {
                        app: required(caps, "app")?,
                        version: required(caps, "version")?,
                    })
                },
            )?,
            CommandPattern::new(
                "restart",
                "heroku restart <app> <dyno> - Restarts the specified app or dyno/s (e.g. worker or web.2)",
                r"(?i)^heroku restart (?P<app>[\w-]+)(?:\s+(?P<dyno>\w+(?:\.\d+)?))?\s*$",
                |caps| {
                    Some(Command::Restart {
                        app: required(caps, "app")?,
                        dyno: required(caps, "dyno"),
                    })
                },
            )?,
            CommandPattern::new(
                "migrate",
                "heroku migrate <app> - Runs migrations. Remember to restart the app =)",
                r"(?i)^heroku migrate (?P<app>\S+)\s*$",
                |caps| Some(Command::Migrate { app: required(caps, "app")? }),
            )?,
            CommandPattern::new(
                "config",
                "heroku config <app> - Get config keys for the app. Values not given for security",
                r"(?i)^heroku config (?P<app>\S+)\s*$",
                |caps| Some(Command::ConfigKeys { app: required(caps, "app")? }),
            )?,
            CommandPattern::new(
                "config:set",
                "heroku config:set <app> <KEY=value> - Set KEY to value. Case sensitive and overrides present key",
                r#"(?is)^heroku config:set (?P<app>\S+) (?P<key>\w+)=(?:'(?P<single>.+)'|"(?P<double>.+)"|(?P<bare>.+))$"#,
                |caps| {
                    // Quoted values are taken verbatim; bare ones lose trailing whitespace.
                    let value = caps
                        .name("single")
                        .or_else(|| caps.name("double"))
                        .map(|m| m.as_str().to_string())
                        .or_else(|| caps.name("bare").map(|m| m.as_str().trim_end().to_string()))?;
                    Some(Command::ConfigSet {
                        app: required(caps, "app")?,
                        key: required(caps, "key")?,
                        value,
                    })
                },
            )?,
            CommandPattern::new(
                "config:unset",
                "heroku config:unset <app> <KEY> - Unsets KEY, does not throw error if key is not present",
                r"(?i)^heroku config:unset (?P<app>\S+) (?P<key>\w+)\s*$",
                |caps| {
                    Some(Command::ConfigUnset {
                        app: required(caps, "app")?,
                        key: required(caps, "key")?,
                    })
                },
            )?,
            CommandPattern::new(
                "run",
                "heroku run <command> <app> <task> - Runs a one off task. Only rake and thor is allowed currently",
                r"(?i)^heroku run (?P<runner>\w+) (?:(?P<flag_task>.+?)\s+--app\s+(?P<flag_app>\S+)|(?P<app>\S+)\s+(?P<task>.+?))\s*$",
                |caps| {
                    let (app, task) = match required(caps, "flag_app") {
                        Some(app) => (app, required(caps, "flag_task")?),
                        None => (required(caps, "app")?, required(caps, "task")?),
                    };
                    Some(Command::Run {
                        runner: required(caps, "runner")?.to_lowercase(),
                        task,
                        app,
                    })
                },
            )?,
            CommandPattern::new(
                "ps:scale",
                "heroku ps:scale <app> <type>=<quantity>(:<size>) - Scales dyno quantity up or down",
                r"(?i)^heroku ps:scale (?P<app>\S+) (?P<type>[^=\s]+)=(?P<quantity>\d+)(?::(?P<size>\S+))?\s*$",
                |caps| {
                    Some(Command::Scale {
                        app: required(caps, "app")?,
                        process_type: required(caps, "type")?,
                        quantity: required(caps, "quantity")?.parse().ok()?,
                        size: required(caps, "size"),
                    })
                },
            )?,
        ];

        if mode == CredentialMode::PerUser {
            patterns.push(CommandPattern::new(
                "auth:login",
                "heroku auth:login <api-token> - Stores your personal Heroku API token",
                r"(?i)^heroku auth:login (?P<token>\S+)\s*$",
                |caps| Some(Command::Login { token: slot(caps, "token")? }),
            )?);
            patterns.push(CommandPattern::new(
                "auth:logout",
                "heroku auth:logout - Forgets your Heroku API token",
                r"(?i)^heroku auth:logout\s*$",
                |_| Some(Command::Logout),
            )?);
        }

        Ok(Self {
            bot_name: bot_name.map(|name| name.trim_start_matches('@').to_lowercase()),
            patterns,
        })
    }

    /// Usage lines of every registered command, in table order.
    pub fn usages(&self) -> Vec<&'static str> {
        self.patterns.iter().map(|p| p.usage).collect()
    }

    /// Matches one line of input. `None` means the input is not a command.
    pub fn parse<'t>(&'t self, text: &str, requester: &str) -> Option<Invocation<'t>> {
        let text = self.strip_address(text.trim());
        self.patterns.iter().find_map(|pattern| {
            pattern.try_match(text).map(|command| Invocation {
                pattern,
                command,
                requester: requester.to_string(),
            })
        })
    }

    /// Drops a leading `botname`, `@botname:` or `botname,` prefix.
    fn strip_address<'a>(&self, text: &'a str) -> &'a str {
        let Some(name) = &self.bot_name else {
            return text;
        };
        let candidate = text.strip_prefix('@').unwrap_or(text);
        let Some(head) = candidate.get(..name.len()) else {
            return text;
        };
        if !head.eq_ignore_ascii_case(name) {
            return text;
        }
        let rest = &candidate[name.len()..];
        let rest = rest.strip_prefix([':', ',']).unwrap_or(rest);
        if rest.starts_with(char::is_whitespace) {
            rest.trim_start()
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CommandTable {
        CommandTable::new(Some("dynobot"), CredentialMode::Global).unwrap()
    }

    fn parse(text: &str) -> Option<Command> {
        table().parse(text, "@damon:example.org").map(|i| i.command)
    }

    #[test]
    fn test_command_surface() {
        let table = table();
        let usages = table.usages();
        assert_eq!(usages.len(), 13);
        assert!(usages.contains(&"heroku info <app> - Returns useful information about the app"));
        assert!(usages.contains(
            &"heroku rollback <app> <version> - Rollback to a release"
        ));
        assert!(!usages.iter().any(|u| u.starts_with("heroku auth:")));

        let per_user = CommandTable::new(None, CredentialMode::PerUser).unwrap();
        assert_eq!(per_user.usages().len(), 15);
    }

    #[test]
    fn test_unmatched_input_is_inert() {
        assert_eq!(parse("hello there"), None);
        assert_eq!(parse("heroku"), None);
        assert_eq!(parse("heroku rollback onlyapp"), None);
        assert_eq!(parse("heroku auth:login abc"), None);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(
            parse("HEROKU Info shield"),
            Some(Command::AppInfo { app: "shield".into() })
        );
    }

    #[test]
    fn test_address_prefix_is_stripped() {
        let expected = Some(Command::Dynos { app: "shield".into() });
        assert_eq!(parse("dynobot heroku dynos shield"), expected);
        assert_eq!(parse("@dynobot: heroku dynos shield"), expected);
        assert_eq!(parse("Dynobot, heroku dynos shield"), expected);
        assert_eq!(parse("dynobotheroku dynos shield"), None);
    }

    #[test]
    fn test_invocation_carries_pattern_and_requester() {
        let table = table();
        let invocation = table.parse("heroku config shield", "@damon:example.org").unwrap();
        assert_eq!(invocation.pattern.name, "config");
        assert_eq!(invocation.requester, "@damon:example.org");
    }

    #[test]
    fn test_list_apps_filter() {
        assert_eq!(parse("heroku list apps"), Some(Command::ListApps { filter: None }));
        assert_eq!(
            parse("heroku list apps staging"),
            Some(Command::ListApps {
                filter: Some("staging".into())
            })
        );
    }

    #[test]
    fn test_releases_accepts_app_flag() {
        assert_eq!(
            parse("heroku releases --app shield"),
            Some(Command::Releases { app: "shield".into() })
        );
    }

    #[test]
    fn test_rollback_slots() {
        assert_eq!(
            parse("heroku rollback myapp v352"),
            Some(Command::Rollback {
                app: "myapp".into(),
                version: "v352".into()
            })
        );
    }

    #[test]
    fn test_restart_with_and_without_dyno() {
        assert_eq!(
            parse("heroku restart shield"),
            Some(Command::Restart { app: "shield".into(), dyno: None })
        );
        assert_eq!(
            parse("heroku restart shield web"),
            Some(Command::Restart {
                app: "shield".into(),
                dyno: Some("web".into())
            })
        );
        assert_eq!(
            parse("heroku restart shield web.1"),
            Some(Command::Restart {
                app: "shield".into(),
                dyno: Some("web.1".into())
            })
        );
    }

    #[test]
    fn test_config_prefers_specific_patterns() {
        assert_eq!(
            parse("heroku config shield"),
            Some(Command::ConfigKeys { app: "shield".into() })
        );
        assert_eq!(
            parse("heroku config:unset shield CLOAK_ID"),
            Some(Command::ConfigUnset {
                app: "shield".into(),
                key: "CLOAK_ID".into()
            })
        );
    }

    fn config_value(text: &str) -> String {
        match parse(text) {
            Some(Command::ConfigSet { value, .. }) => value,
            other => panic!("expected config:set, got {other:?}"),
        }
    }

    #[test]
    fn test_config_set_bare_values() {
        assert_eq!(
            parse("heroku config:set myapp KEY=value with spaces"),
            Some(Command::ConfigSet {
                app: "myapp".into(),
                key: "KEY".into(),
                value: "value with spaces".into()
            })
        );
        assert_eq!(
            config_value("heroku config:set shield PUSHER_URL=http://a:b@api.pusherapp.com/apps/1234"),
            "http://a:b@api.pusherapp.com/apps/1234"
        );
        assert_eq!(
            config_value("heroku config:set shield LIST=MiD,DA,MDe"),
            "MiD,DA,MDe"
        );
    }

    #[test]
    fn test_config_set_quoted_values_keep_inner_text() {
        assert_eq!(
            config_value(r#"heroku config:set shield SENTENCE="Don't stop believin.""#),
            "Don't stop believin."
        );
        assert_eq!(
            config_value(r#"heroku config:set shield QUOTE='she said "hi" twice'"#),
            r#"she said "hi" twice"#
        );
        let key = "----BEGIN RSA PRIVATE KEY-----\nsfsdfdssfdsFDSFDGSDfsdfsfs\n-----END RSA PRIVATE KEY-----\n";
        assert_eq!(
            config_value(&format!("heroku config:set shield RSA=\"{key}\"")),
            key
        );
    }

    #[test]
    fn test_run_both_shapes() {
        let expected = Some(Command::Run {
            runner: "rake".into(),
            task: "some:task".into(),
            app: "shield".into(),
        });
        assert_eq!(parse("heroku run rake shield some:task"), expected);
        assert_eq!(parse("heroku run RAKE some:task --app shield"), expected);
        assert_eq!(
            parse("heroku run thor shield deploy:notify --force"),
            Some(Command::Run {
                runner: "thor".into(),
                task: "deploy:notify --force".into(),
                app: "shield".into(),
            })
        );
    }

    #[test]
    fn test_scale_slots() {
        assert_eq!(
            parse("heroku ps:scale shield web=2"),
            Some(Command::Scale {
                app: "shield".into(),
                process_type: "web".into(),
                quantity: 2,
                size: None
            })
        );
        assert_eq!(
            parse("heroku ps:scale shield web=2:standard-2X"),
            Some(Command::Scale {
                app: "shield".into(),
                process_type: "web".into(),
                quantity: 2,
                size: Some("standard-2X".into())
            })
        );
        assert_eq!(parse("heroku ps:scale shield web=lots"), None);
    }

    #[test]
    fn test_version_shape() {
        assert!(is_version_label("v352"));
        assert!(is_version_label("V7"));
        assert!(!is_version_label("352"));
        assert!(!is_version_label("v"));
        assert!(!is_version_label("v35a"));
        assert!(!is_version_label("latest"));
    }

    #[test]
    fn test_validation_checks_runner_and_version() {
        let settings = CommandsConfig::default();
        let run = |runner: &str| Command::Run {
            runner: runner.into(),
            task: "db:seed".into(),
            app: "shield".into(),
        };
        assert_eq!(run("thor").validate(&settings).unwrap(), Validation::Proceed);
        match run("bash").validate(&settings) {
            Err(CommandError::Rejected(text)) => assert_eq!(text, "Only rake and thor can be run"),
            other => panic!("expected rejection, got {other:?}"),
        }

        let rollback = |version: &str| Command::Rollback {
            app: "shield".into(),
            version: version.into(),
        };
        assert_eq!(rollback("v352").validate(&settings).unwrap(), Validation::Proceed);
        assert_eq!(rollback("352").validate(&settings).unwrap(), Validation::Ignore);

        let strict = CommandsConfig {
            malformed_version: MalformedVersionPolicy::Reject,
            ..CommandsConfig::default()
        };
        assert!(matches!(
            rollback("352").validate(&strict),
            Err(CommandError::Rejected(_))
        ));
    }

    #[test]
    fn test_scopes() {
        assert_eq!(Command::Help.scope(), AuthScope::Public);
        assert_eq!(Command::ListApps { filter: None }.scope(), AuthScope::Admin);
        assert_eq!(
            Command::Migrate { app: "shield".into() }.scope(),
            AuthScope::App("shield".into())
        );
    }
}
