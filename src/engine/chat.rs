//! Rule-based replies for the chat pane.
//!
//! [`TOPICS`] is checked top to bottom against the lower-cased message and
//! the first topic with a keyword contained in it wins. Keywords match as
//! plain substrings, so "hi" also matches inside "this".

use super::profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicKind {
    Greeting,
    Affirmation,
    Location,
    Contact,
    Skills,
    Projects,
    Experience,
    Company,
    Resume,
    Gratitude,
    Help,
}

pub struct Topic {
    pub kind: TopicKind,
    pub keywords: &'static [&'static str],
    pub reply: fn() -> String,
}

impl Topic {
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|kw| normalized.contains(kw))
    }
}

pub const GREETING_REPLY: &str = "Hello! I'm Peter's virtual assistant. How can I help you today?";

pub const DEFAULT_REPLY: &str = "I don't have specific information about that. \
Would you like to know about Peter's skills, experience, or how to contact him?";

/// Topics in priority order.
pub const TOPICS: &[Topic] = &[
    Topic {
        kind: TopicKind::Greeting,
        keywords: &["hello", "hi", "hey", "greetings"],
        reply: || GREETING_REPLY.to_string(),
    },
    Topic {
        kind: TopicKind::Affirmation,
        keywords: &["yes", "yeah", "yes please"],
        reply: || {
            "Great! You can ask about Peter's skills, projects, experience, or how to get in touch.".to_string()
        },
    },
    Topic {
        kind: TopicKind::Location,
        keywords: &["location", "where", "based", "country", "city", "live"],
        reply: || {
            "Peter is based in Lusaka, Zambia, and works with clients both locally and remotely.".to_string()
        },
    },
    Topic {
        kind: TopicKind::Contact,
        keywords: &["contact", "email", "reach", "phone", "call", "whatsapp"],
        reply: || {
            format!(
                "You can contact Peter via email at {}, call or WhatsApp him on {}, \
                 or connect with him on LinkedIn at /in/marcosmwaba. \
                 Is there something specific you'd like to discuss with him?",
                profile::EMAIL,
                profile::PHONE
            )
        },
    },
    Topic {
        kind: TopicKind::Skills,
        keywords: &["skill", "tech", "know", "can do"],
        reply: || {
            "Peter is skilled in frontend development with React, TypeScript, and Tailwind CSS. \
             He's also proficient in backend technologies like Node.js, and has experience with \
             Linux systems and cybersecurity. Would you like to know more about any specific skill?"
                .to_string()
        },
    },
    Topic {
        kind: TopicKind::Projects,
        keywords: &["project", "work", "portfolio", "built"],
        reply: || {
            format!(
                "Peter has worked on various projects showcasing his skills in software development \
                 and IT support. Check out his GitHub profile at {} for code examples and project repositories.",
                profile::GITHUB_URL
            )
        },
    },
    Topic {
        kind: TopicKind::Experience,
        keywords: &["experience", "background", "history", "career"],
        reply: || {
            "Peter Marcos Mwaba is a Software Engineer, IT Support Specialist, and CEO of Marcos \
             Enterprise based in Lusaka, Zambia. He combines technical expertise with business \
             leadership to deliver innovative solutions."
                .to_string()
        },
    },
    Topic {
        kind: TopicKind::Company,
        keywords: &["marcos enterprise", "company", "business", "enterprise"],
        reply: || {
            "Marcos Enterprise is a tech company founded by Peter Marcos Mwaba. The company focuses \
             on providing software solutions and IT support services to businesses in Zambia and beyond."
                .to_string()
        },
    },
    Topic {
        kind: TopicKind::Resume,
        keywords: &["resume", "cv", "qualification"],
        reply: || {
            "You can get Peter's resume with the `resume` command in the terminal pane. It contains \
             detailed information about his skills, experience, and qualifications."
                .to_string()
        },
    },
    Topic {
        kind: TopicKind::Gratitude,
        keywords: &["thank", "thanks", "appreciate"],
        reply: || {
            "You're welcome! If you have any more questions about Peter or his work, feel free to ask."
                .to_string()
        },
    },
    Topic {
        kind: TopicKind::Help,
        keywords: &["help", "menu", "options"],
        reply: || {
            "I can tell you about Peter's skills, projects, experience, company, location, resume, \
             or how to contact him. What would you like to know?"
                .to_string()
        },
    },
];

/// First topic whose keywords appear in `message`.
pub fn classify(message: &str) -> Option<TopicKind> {
    let normalized = message.trim().to_lowercase();
    TOPICS.iter().find(|t| t.matches(&normalized)).map(|t| t.kind)
}

/// Canned reply for `message`. Pure: same input, same output.
pub fn reply_to(message: &str) -> String {
    let normalized = message.trim().to_lowercase();
    TOPICS
        .iter()
        .find(|t| t.matches(&normalized))
        .map(|t| (t.reply)())
        .unwrap_or_else(|| DEFAULT_REPLY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order_is_fixed() {
        let order: Vec<TopicKind> = TOPICS.iter().map(|t| t.kind).collect();
        assert_eq!(
            order,
            vec![
                TopicKind::Greeting,
                TopicKind::Affirmation,
                TopicKind::Location,
                TopicKind::Contact,
                TopicKind::Skills,
                TopicKind::Projects,
                TopicKind::Experience,
                TopicKind::Company,
                TopicKind::Resume,
                TopicKind::Gratitude,
                TopicKind::Help,
            ]
        );
    }

    #[test]
    fn test_first_match_wins() {
        let msg = "hi, can you give me your email?";
        assert_eq!(classify(msg), Some(TopicKind::Greeting));
        assert_eq!(reply_to(msg), GREETING_REPLY);
    }

    #[test]
    fn test_whatsapp_gets_contact_details() {
        let msg = "I want your whatsapp";
        assert_eq!(classify(msg), Some(TopicKind::Contact));
        let reply = reply_to(msg);
        assert!(reply.contains(profile::PHONE));
        assert!(reply.contains(profile::EMAIL));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("THANKS a lot"), Some(TopicKind::Gratitude));
        assert_eq!(classify("Your CV please"), Some(TopicKind::Resume));
    }

    #[test]
    fn test_substring_semantics() {
        // "history" contains "hi", so greeting outranks experience.
        assert_eq!(classify("history"), Some(TopicKind::Greeting));
        assert_eq!(classify("career"), Some(TopicKind::Experience));
        assert_eq!(classify("company"), Some(TopicKind::Company));
        // "what can do" contains "can do"
        assert_eq!(classify("what can do"), Some(TopicKind::Skills));
    }

    #[test]
    fn test_each_topic_reachable() {
        assert_eq!(classify("yeah"), Some(TopicKind::Affirmation));
        assert_eq!(classify("country?"), Some(TopicKind::Location));
        assert_eq!(classify("portfolio"), Some(TopicKind::Projects));
        assert_eq!(classify("menu"), Some(TopicKind::Help));
    }

    #[test]
    fn test_default_reply() {
        assert_eq!(classify("quantum"), None);
        assert_eq!(reply_to("quantum"), DEFAULT_REPLY);
        assert_eq!(reply_to(""), DEFAULT_REPLY);
    }

    #[test]
    fn test_pure() {
        assert_eq!(reply_to("tell me about projects"), reply_to("tell me about projects"));
    }
}
