//! Canned facts about the portfolio owner.

pub const EMAIL: &str = "offtunedlungu@gmail.com";
pub const PHONE: &str = "+260 971 234 567";
pub const GITHUB_URL: &str = "https://github.com/marcosmwaba";
pub const LINKEDIN_URL: &str = "https://www.linkedin.com/in/marcosmwaba-825219280";
pub const MAILTO_URL: &str = "mailto:offtunedlungu@gmail.com";
pub const PROMPT: &str = "guest@portfolio:~$";
pub const WHOAMI: &str = "guest@marcosmwaba-portfolio";

pub const LS_OUTPUT: &str = "about.txt  contact.txt  projects.txt  skills.txt  resume.pdf";

pub const SOCIAL: &str = "GitHub: @marcosmwaba\nLinkedIn: /in/marcosmwaba\nEmail: offtunedlungu@gmail.com";

pub const EXPERIENCE: &str = "CEO @ Marcos Enterprise (2020-Present)\n\
Software Engineer @ Tech Solutions (2018-2020)\n\
IT Support Specialist @ ZambiaTech (2016-2018)";

pub const EDUCATION: &str = "BSc Computer Science - University of Zambia (2014-2018)\n\
Certified Information Security Professional (2019)";

pub const WEATHER: &str = "Current weather in Lusaka: 🌤️ 28°C, Partly Cloudy";

pub const JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs!",
    "How many programmers does it take to change a light bulb? None, that's a hardware problem!",
    "Why do developers use mechanical keyboards? To strongly type their code!",
];

pub const COLORS: &[&str] = &["red", "green", "blue", "yellow", "cyan", "magenta", "orange", "purple"];
