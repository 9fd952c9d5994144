//! Command dispatch for the simulated shell.
//!
//! Two tables share this module: the full terminal table, which dispatches
//! on the first whitespace-separated token, and the small hero table, which
//! matches the whole line.

use chrono::Local;
use tracing::debug;

use crate::i18n::{self, Language};
use crate::interpreter::History;

use super::calc;
use super::profile;

/// Commands known to the terminal pane, in dispatch and autocomplete order.
pub const SHELL_VOCABULARY: &[&str] = &[
    "help", "about", "contact", "projects", "skills", "resume",
    "clear", "echo", "date", "time", "ls", "cd", "whoami",
    "social", "experience", "education", "weather", "joke",
    "github", "linkedin", "email", "calc", "color", "history",
];

/// Commands known to the hero pane.
pub const HERO_VOCABULARY: &[&str] = &["help", "about", "contact", "projects", "skills", "resume", "clear"];

pub const CALC_CHARSET_ERROR: &str = "Error: Only basic arithmetic operations are allowed";
pub const CALC_EVAL_ERROR: &str = "Error in calculation. Try a different expression.";
pub const CALC_USAGE: &str = "Usage: calc <expression> (e.g., calc 2+2)";

/// What the host should do with a submitted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    /// Blank input; nothing to append.
    Ignore,
    /// Empty the transcript instead of appending.
    Clear,
    /// Append a response, optionally tinted.
    Reply { text: String, color: Option<String> },
    /// Open an external link and append a confirmation.
    Open { url: &'static str, text: String },
}

impl ShellOutcome {
    fn reply(text: impl Into<String>) -> Self {
        ShellOutcome::Reply { text: text.into(), color: None }
    }

    /// Text that would be appended to the transcript, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            ShellOutcome::Reply { text, .. } | ShellOutcome::Open { text, .. } => Some(text),
            ShellOutcome::Ignore | ShellOutcome::Clear => None,
        }
    }
}

pub struct ShellEngine {
    lang: Language,
    rng: fastrand::Rng,
}

impl Default for ShellEngine {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl ShellEngine {
    pub fn new(lang: Language) -> Self {
        Self { lang, rng: fastrand::Rng::new() }
    }

    /// Engine with a fixed seed for `joke` and `color`.
    pub fn with_seed(lang: Language, seed: u64) -> Self {
        Self { lang, rng: fastrand::Rng::with_seed(seed) }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn set_language(&mut self, lang: Language) {
        self.lang = lang;
    }

    /// Welcome lines printed when the terminal pane opens or the language changes.
    pub fn banner(&self) -> Vec<String> {
        ["welcome", "bio_intro", "bio_help", "sys_initialized"]
            .into_iter()
            .map(|key| i18n::t(self.lang, key))
            .collect()
    }

    /// Hero lines shown before the boot line.
    pub fn hero_banner(&self) -> Vec<String> {
        ["welcome", "bio_intro", "bio_help"]
            .into_iter()
            .map(|key| i18n::t(self.lang, key))
            .collect()
    }

    pub fn boot_line(&self) -> String {
        i18n::t(self.lang, "sys_initialized")
    }

    /// Terminal table. `history` is the history before this line was recorded.
    pub fn respond(&mut self, line: &str, history: &History) -> ShellOutcome {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            return ShellOutcome::Ignore;
        };
        let command = first.to_lowercase();
        let args: Vec<&str> = tokens.collect();
        debug!(command = %command, argc = args.len(), "shell dispatch");

        let lang = self.lang;
        let t = |key: &str| i18n::t(lang, key);

        match command.as_str() {
            "help" => ShellOutcome::reply(format!(
                "{}\n\nAdditional commands: {}",
                t("help_cmd"),
                SHELL_VOCABULARY[7..].join(", ")
            )),
            "about" => ShellOutcome::reply(t("about_cmd")),
            "contact" => ShellOutcome::reply(t("contact_cmd")),
            "projects" => ShellOutcome::reply(t("projects_cmd")),
            "skills" => ShellOutcome::reply(t("skills_cmd")),
            "resume" => ShellOutcome::reply(t("resume_cmd")),
            "clear" => ShellOutcome::Clear,
            "echo" => {
                if args.is_empty() {
                    ShellOutcome::reply("Echo what?")
                } else {
                    ShellOutcome::reply(args.join(" "))
                }
            }
            "date" => ShellOutcome::reply(Local::now().format("%x").to_string()),
            "time" => ShellOutcome::reply(Local::now().format("%X").to_string()),
            "ls" => ShellOutcome::reply(profile::LS_OUTPUT),
            "cd" => match args.first() {
                Some(dir) => ShellOutcome::reply(format!("Changed directory to {}", dir)),
                None => ShellOutcome::reply("Please specify a directory"),
            },
            "whoami" => ShellOutcome::reply(profile::WHOAMI),
            "social" => ShellOutcome::reply(profile::SOCIAL),
            "experience" => ShellOutcome::reply(profile::EXPERIENCE),
            "education" => ShellOutcome::reply(profile::EDUCATION),
            "weather" => ShellOutcome::reply(profile::WEATHER),
            "joke" => {
                let idx = self.rng.usize(..profile::JOKES.len());
                ShellOutcome::reply(profile::JOKES[idx])
            }
            "github" => ShellOutcome::Open {
                url: profile::GITHUB_URL,
                text: "Opening GitHub profile...".to_string(),
            },
            "linkedin" => ShellOutcome::Open {
                url: profile::LINKEDIN_URL,
                text: "Opening LinkedIn profile...".to_string(),
            },
            "email" => ShellOutcome::Open {
                url: profile::MAILTO_URL,
                text: "Opening email client...".to_string(),
            },
            "calc" => ShellOutcome::reply(calculate(&args)),
            "color" => {
                let color = match args.first() {
                    Some(name) => name.to_lowercase(),
                    None => profile::COLORS[self.rng.usize(..profile::COLORS.len())].to_string(),
                };
                ShellOutcome::Reply {
                    text: format!("This text is now {}!", color),
                    color: Some(color),
                }
            }
            "history" => {
                if history.is_empty() {
                    ShellOutcome::reply("No command history yet")
                } else {
                    let listing: Vec<String> = history
                        .entries()
                        .iter()
                        .enumerate()
                        .map(|(i, cmd)| format!("{}. {}", i + 1, cmd))
                        .collect();
                    ShellOutcome::reply(listing.join("\n"))
                }
            }
            _ => ShellOutcome::reply(i18n::t1(lang, "cmd_not_found", &command)),
        }
    }

    /// Hero table: the whole line, lower-cased, must name a command.
    pub fn respond_hero(&self, line: &str) -> ShellOutcome {
        let input = line.trim();
        if input.is_empty() {
            return ShellOutcome::Ignore;
        }

        let t = |key: &str| i18n::t(self.lang, key);
        match input.to_lowercase().as_str() {
            "help" => ShellOutcome::reply(t("help_cmd")),
            "about" => ShellOutcome::reply(t("about_cmd")),
            "contact" => ShellOutcome::reply(t("contact_cmd")),
            "projects" => ShellOutcome::reply(t("projects_cmd")),
            "skills" => ShellOutcome::reply(t("skills_cmd")),
            "resume" => ShellOutcome::reply(t("resume_cmd")),
            "clear" => ShellOutcome::Clear,
            _ => ShellOutcome::reply(format!(
                "Command not found: {}. Type 'help' to see available commands.",
                input
            )),
        }
    }
}

fn calculate(args: &[&str]) -> String {
    if args.is_empty() {
        return CALC_USAGE.to_string();
    }

    let expression = args.concat();
    if calc::check_charset(&expression).is_err() {
        return CALC_CHARSET_ERROR.to_string();
    }

    match calc::evaluate(&expression) {
        Ok(value) => format!("{} = {}", expression, calc::format_number(value)),
        Err(e) => {
            debug!("calc failed for {:?}: {}", expression, e);
            CALC_EVAL_ERROR.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(engine: &mut ShellEngine, line: &str) -> String {
        engine
            .respond(line, &History::new())
            .text()
            .map(str::to_string)
            .unwrap_or_default()
    }

    #[test]
    fn test_vocabulary_covers_dispatch() {
        let mut engine = ShellEngine::with_seed(Language::En, 7);
        for name in SHELL_VOCABULARY {
            let outcome = engine.respond(name, &History::new());
            if let Some(text) = outcome.text() {
                assert!(!text.starts_with("command not found"), "{} fell through", name);
            }
        }
    }

    #[test]
    fn test_banner_follows_language() {
        let mut engine = ShellEngine::new(Language::En);
        let banner = engine.banner();
        assert_eq!(banner.len(), 4);
        assert_eq!(banner[0], "Welcome to my terminal portfolio!");
        assert_eq!(banner[3], engine.boot_line());

        engine.set_language(Language::Fr);
        assert_eq!(engine.banner()[0], "Bienvenue dans mon portfolio terminal !");
        assert_eq!(engine.hero_banner().len(), 3);
    }

    #[test]
    fn test_echo() {
        let mut engine = ShellEngine::default();
        assert_eq!(reply(&mut engine, "echo hello world"), "hello world");
        assert_eq!(reply(&mut engine, "echo"), "Echo what?");
        assert_eq!(reply(&mut engine, "ECHO  spaced   out"), "spaced out");
    }

    #[test]
    fn test_calc() {
        let mut engine = ShellEngine::default();
        assert_eq!(reply(&mut engine, "calc 2+2*3"), "2+2*3 = 8");
        assert_eq!(reply(&mut engine, "calc 2 + 2"), "2+2 = 4");
        assert_eq!(reply(&mut engine, "calc 2+DROP"), CALC_CHARSET_ERROR);
        assert_eq!(reply(&mut engine, "calc 2+*"), CALC_EVAL_ERROR);
        assert_eq!(reply(&mut engine, "calc"), CALC_USAGE);
        assert_eq!(reply(&mut engine, "calc 2 - -3"), CALC_EVAL_ERROR);
        assert_eq!(reply(&mut engine, "calc 0.0000001"), "0.0000001 = 1e-7");
    }

    #[test]
    fn test_calc_deep_nesting_reports_error() {
        let mut engine = ShellEngine::default();
        let n = 100_000;
        let line = format!("calc {}1{}", "(".repeat(n), ")".repeat(n));
        assert_eq!(reply(&mut engine, &line), CALC_EVAL_ERROR);
    }

    #[test]
    fn test_clear() {
        let mut engine = ShellEngine::default();
        assert_eq!(engine.respond("clear", &History::new()), ShellOutcome::Clear);
        assert_eq!(engine.respond("CLEAR now", &History::new()), ShellOutcome::Clear);
    }

    #[test]
    fn test_unknown_command_echoes_token() {
        let mut engine = ShellEngine::default();
        let text = reply(&mut engine, "foobar --flag");
        assert!(text.contains("foobar"));
        assert!(!text.contains("--flag"));
    }

    #[test]
    fn test_blank_is_ignored() {
        let mut engine = ShellEngine::default();
        assert_eq!(engine.respond("   ", &History::new()), ShellOutcome::Ignore);
    }

    #[test]
    fn test_cd() {
        let mut engine = ShellEngine::default();
        assert_eq!(reply(&mut engine, "cd projects"), "Changed directory to projects");
        assert_eq!(reply(&mut engine, "cd"), "Please specify a directory");
    }

    #[test]
    fn test_links_open() {
        let mut engine = ShellEngine::default();
        match engine.respond("github", &History::new()) {
            ShellOutcome::Open { url, text } => {
                assert_eq!(url, profile::GITHUB_URL);
                assert_eq!(text, "Opening GitHub profile...");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(matches!(
            engine.respond("email", &History::new()),
            ShellOutcome::Open { url: profile::MAILTO_URL, .. }
        ));
    }

    #[test]
    fn test_color() {
        let mut engine = ShellEngine::with_seed(Language::En, 1);
        assert_eq!(
            engine.respond("color Red", &History::new()),
            ShellOutcome::Reply {
                text: "This text is now red!".to_string(),
                color: Some("red".to_string()),
            }
        );
        match engine.respond("color", &History::new()) {
            ShellOutcome::Reply { color: Some(c), .. } => assert!(profile::COLORS.contains(&c.as_str())),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_joke_is_from_table() {
        let mut engine = ShellEngine::with_seed(Language::En, 42);
        let text = reply(&mut engine, "joke");
        assert!(profile::JOKES.contains(&text.as_str()));
    }

    #[test]
    fn test_history_listing() {
        let mut engine = ShellEngine::default();
        let history = History::new().with("ls").with("whoami");
        let outcome = engine.respond("history", &history);
        assert_eq!(outcome.text(), Some("1. ls\n2. whoami"));
        assert_eq!(reply(&mut engine, "history"), "No command history yet");
    }

    #[test]
    fn test_help_lists_additional_commands() {
        let mut engine = ShellEngine::default();
        let text = reply(&mut engine, "help");
        assert!(text.ends_with("Additional commands: echo, date, time, ls, cd, whoami, social, experience, education, weather, joke, github, linkedin, email, calc, color, history"));
    }

    #[test]
    fn test_localized_not_found() {
        let mut engine = ShellEngine::new(Language::Fr);
        assert!(reply(&mut engine, "foobar").starts_with("commande introuvable : foobar"));
    }

    #[test]
    fn test_hero_table() {
        let engine = ShellEngine::default();
        assert_eq!(engine.respond_hero("HELP").text(), Some(i18n::t(Language::En, "help_cmd").as_str()));
        assert_eq!(engine.respond_hero("clear"), ShellOutcome::Clear);
        assert_eq!(engine.respond_hero(""), ShellOutcome::Ignore);
        assert_eq!(
            engine.respond_hero("echo hi").text(),
            Some("Command not found: echo hi. Type 'help' to see available commands.")
        );
    }
}
