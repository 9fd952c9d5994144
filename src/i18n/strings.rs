use super::Language;

const EN: &[(&str, &str)] = &[
    ("welcome", "Welcome to my terminal portfolio!"),
    (
        "bio_intro",
        "I'm Peter Marcos Mwaba, a Software Engineer, IT Support Specialist and CEO of Marcos Enterprise based in Lusaka, Zambia.",
    ),
    ("bio_help", "Type 'help' to see available commands or explore the other panes (Ctrl+B then n)."),
    ("sys_initialized", "System initialized and ready. Portfolio v2.1.0 loaded successfully."),
    ("help_cmd", "Available commands: about, contact, projects, skills, resume, clear"),
    (
        "about_cmd",
        "I'm Peter Marcos Mwaba, a passionate developer with expertise in modern web technologies. I love building intuitive, performant applications that solve real-world problems.",
    ),
    ("contact_cmd", "Email: offtunedlungu@gmail.com | LinkedIn: /in/marcosmwaba | GitHub: @marcosmwaba"),
    ("projects_cmd", "Featured projects are listed on GitHub: https://github.com/marcosmwaba"),
    (
        "skills_cmd",
        "Frontend: React, TypeScript, Tailwind CSS\nBackend: Node.js, REST APIs\nSystems: Linux administration, networking, cybersecurity",
    ),
    ("resume_cmd", "You can download my resume from https://marcosmwaba.dev/resume.pdf"),
    ("cmd_not_found", "command not found: {0}. Type 'help' to see available commands."),
    ("chat_hint", "Ask me questions about Peter's experience, skills, or projects!"),
    ("contact_sent", "Thank you for your message. I'll get back to you soon!"),
    ("contact_failed", "Failed to send message. Please try again later."),
];

const FR: &[(&str, &str)] = &[
    ("welcome", "Bienvenue dans mon portfolio terminal !"),
    ("bio_help", "Tapez 'help' pour voir les commandes disponibles."),
    ("sys_initialized", "Système initialisé et prêt. Portfolio v2.1.0 chargé avec succès."),
    ("cmd_not_found", "commande introuvable : {0}. Tapez 'help' pour voir les commandes disponibles."),
];

const ZH: &[(&str, &str)] = &[
    ("welcome", "欢迎来到我的终端作品集！"),
    ("bio_help", "输入 'help' 查看可用命令。"),
    ("sys_initialized", "系统已初始化。Portfolio v2.1.0 加载成功。"),
    ("cmd_not_found", "未找到命令：{0}。输入 'help' 查看可用命令。"),
];

const ES: &[(&str, &str)] = &[
    ("welcome", "¡Bienvenido a mi portafolio de terminal!"),
    ("bio_help", "Escribe 'help' para ver los comandos disponibles."),
    ("sys_initialized", "Sistema inicializado y listo. Portfolio v2.1.0 cargado correctamente."),
    ("cmd_not_found", "comando no encontrado: {0}. Escribe 'help' para ver los comandos disponibles."),
];

const KO: &[(&str, &str)] = &[
    ("welcome", "제 터미널 포트폴리오에 오신 것을 환영합니다!"),
    ("bio_help", "사용 가능한 명령을 보려면 'help'를 입력하세요."),
    ("sys_initialized", "시스템이 초기화되었습니다. Portfolio v2.1.0 로드 완료."),
    ("cmd_not_found", "명령을 찾을 수 없음: {0}. 'help'를 입력하세요."),
];

fn table(lang: Language) -> &'static [(&'static str, &'static str)] {
    match lang {
        Language::En => EN,
        Language::Fr => FR,
        Language::Zh => ZH,
        Language::Es => ES,
        Language::Ko => KO,
    }
}

pub(super) fn lookup(lang: Language, key: &str) -> Option<&'static str> {
    table(lang)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}
