//! Canned console content: the help menu, topic payloads and the reply for
//! unrecognized commands.

/// Reply revealed for any command the dispatcher does not recognize.
pub const NOT_FOUND: &str = "Command not found. Type 'help' to see available commands.";

/// Menu revealed by `help`.
pub const HELP: &str = "
Available commands:
1. Introduction   - Learn more about me
2. Experience     - View my work experience
3. Achievements   - See my accomplishments
4. Projects       - Browse my projects
5. Skills         - Languages and tools I use
6. Education      - View my educational background
7. Contact        - Get in touch with me

Type a number or command to continue...
Type 'clear' to reset the terminal";

/// A content topic reachable by name or by its number in the help menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Introduction,
    Experience,
    Achievements,
    Projects,
    Skills,
    Education,
    Contact,
}

impl Topic {
    /// All topics in help-menu order.
    pub const ALL: [Topic; 7] = [
        Topic::Introduction,
        Topic::Experience,
        Topic::Achievements,
        Topic::Projects,
        Topic::Skills,
        Topic::Education,
        Topic::Contact,
    ];

    /// Command name, already normalized (lowercase).
    pub fn key(self) -> &'static str {
        match self {
            Topic::Introduction => "introduction",
            Topic::Experience => "experience",
            Topic::Achievements => "achievements",
            Topic::Projects => "projects",
            Topic::Skills => "skills",
            Topic::Education => "education",
            Topic::Contact => "contact",
        }
    }

    /// Numeric alias as listed in the help menu.
    pub fn alias(self) -> &'static str {
        match self {
            Topic::Introduction => "1",
            Topic::Experience => "2",
            Topic::Achievements => "3",
            Topic::Projects => "4",
            Topic::Skills => "5",
            Topic::Education => "6",
            Topic::Contact => "7",
        }
    }

    /// Text revealed when the topic is selected.
    pub fn payload(self) -> &'static str {
        match self {
            Topic::Introduction => {
                "Hi, I build software that lives close to the metal: terminals, \
                 parsers and the occasional network service.\n\
                 This console is a small tour. Pick a topic from 'help' to look around."
            }
            Topic::Experience => {
                "Backend engineer, storage team (4 years)\n  \
                 - Owned the write path of a replicated key-value store\n  \
                 - Cut p99 commit latency by 40%\n\
                 Tools engineer, developer platform (2 years)\n  \
                 - Built the internal CLI used by every service team"
            }
            Topic::Achievements => {
                "- Speaker at two regional systems conferences\n\
                 - Maintainer of a terminal UI library with 2k+ stars\n\
                 - Winner of an internal hackathon with a log-structured cache"
            }
            Topic::Projects => {
                "typeterm   - this console: a typewriter reveal engine for the terminal\n\
                 kvlog      - an append-only key-value log with crash recovery\n\
                 wiretap    - a packet capture viewer with a TUI front end"
            }
            Topic::Skills => {
                "Languages: Rust, Go, TypeScript, SQL\n\
                 Systems:   Linux, networking, storage engines\n\
                 Tooling:   tokio, ratatui, PostgreSQL, Docker"
            }
            Topic::Education => {
                "B.Sc. Computer Science\n  \
                 Thesis: incremental parsing for interactive editors"
            }
            Topic::Contact => {
                "Email:  hello@example.com\n\
                 GitHub: github.com/example\n\
                 Say hi, I read everything."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_and_aliases_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for topic in Topic::ALL {
            assert!(seen.insert(topic.key()));
            assert!(seen.insert(topic.alias()));
        }
    }

    #[test]
    fn help_lists_every_topic() {
        let help = HELP.to_lowercase();
        for topic in Topic::ALL {
            assert!(help.contains(topic.key()), "help is missing {}", topic.key());
            assert!(help.contains(&format!("{}. ", topic.alias())));
        }
        assert!(help.contains("clear"));
    }
}
