/// Requirement tree code of the Computer Science major.
pub const CS_MAJOR_CODE: &str = "BSCS-CSCI";

/// Major display names as listed in `Majors.json` and the code of their entry
/// in the major requirement tree. Order matters for the substring fallback.
pub const MAJOR_CODES: &[(&str, &str)] = &[
    ("Computer Science*", CS_MAJOR_CODE),
    ("Computer Science", CS_MAJOR_CODE),
    ("Africana Studies", "BA-AFCS"),
    ("American Sign Language", "BS-ASLI"),
    ("American Sign Language – English Interpreting", "BS-ASLI"),
    ("Applied Physics", "BS-APHY"),
    ("Architectural Studies", "BS-ARCS"),
    ("Architecture", "BS-ARCH"),
    ("Art: Art, Visual Studies", "BA-ARTS"),
    ("Behavioral Neuroscience*", "BS-PSYC"),
    ("Biochemistry", "BS-CHEM"),
    ("Bioengineering", "BSBIOE-BION"),
    ("Biology*", "BS-BIOL"),
    ("Biology", "BS-BIOL"),
    ("Biomedical Physics", "BS-BIMP"),
    ("Business Administration*", "BSBA-BSAD"),
    ("Business Administration", "BSBA-BSAD"),
    ("Business Administration: Accounting", "BSBA-BSAD"),
    ("Business Administration: Accounting and Advisory Services", "BSBA-BSAD"),
    ("Business Administration: Brand Management", "BSBA-BSAD"),
    ("Business Administration: Business Analytics", "BSBA-BSAD"),
    ("Business Administration: Corporate Innovation", "BSBA-BSAD"),
    ("Business Administration: Entrepreneurial Startups", "BSBA-BSAD"),
    ("Business Administration: Family Business", "BSBA-BSAD"),
    ("Business Administration: Finance", "BSBA-BSAD"),
    ("Business Administration: Fintech", "BSBA-BSAD"),
    ("Business Administration: Healthcare Management and Consulting", "BSBA-BSAD"),
    ("Business Administration: Management", "BSBA-BSAD"),
    ("Business Administration: Management Information Systems", "BSBA-BSAD"),
    ("Business Administration: Marketing", "BSBA-BSAD"),
    ("Business Administration: Marketing Analytics", "BSBA-BSAD"),
    ("Business Administration: Social Innovation and Entrepreneurship", "BSBA-BSAD"),
    ("Business Administration: Supply Chain Management", "BSBA-BSAD"),
    ("Business Administration: Undeclared", "BSBA-BSAD"),
    ("Cell and Molecular Biology", "BS-BIOL"),
    ("Chemical Engineering", "BSCHE-CHME"),
    ("Chemistry", "BS-CHEM"),
    ("Civil Engineering", "BSCE-CIVE"),
    ("Communication Studies", "BA-CMST"),
    ("Computer Engineering", "BSEE-ELEE"),
    ("Computing and Law", "BA-CUAN"),
    ("Criminology and Criminal Justice", "BS-CUAN"),
    ("Cultural Anthropology", "BA-CUAN"),
    ("Cybersecurity", "BS-CYBS"),
    ("Data Science", "BS-DASC"),
    ("Design", "BFA-DESN"),
    ("Economics", "BA-ECON"),
    ("Electrical Engineering", "BSEE-ELEE"),
    ("English", "BA-ENGL"),
    ("Environmental Engineering", "BSENVE-ENVI"),
    ("Environmental Studies", "BA-ENVS"),
    ("Game Design", "BFA-GAME"),
    ("Global Studies", "BA-GLAS"),
    ("Health Science", "BS-HLSC"),
    ("History", "BA-HIST"),
    ("Human Services", "BA-HSVC"),
    ("Industrial Engineering", "BS-INST"),
    ("International Affairs", "BA-INAF"),
    ("Journalism", "BA-JOUR"),
    ("Landscape Architecture", "BLA-LARC"),
    ("Linguistics", "BS-LING"),
    ("Marine Biology", "BS-MARB"),
    ("Mathematics*", "BS-MATH"),
    ("Mathematics", "BA-MATH"),
    ("Mechanical Engineering", "BSME-MECE"),
    ("Media and Screen Studies", "BA-MSST"),
    ("Media Arts", "BFA-MART"),
    ("Music", "BA-MUSI"),
    ("Nursing", "BSN-NURS"),
    ("Philosophy*", "BS-PHIL"),
    ("Philosophy", "BA-PHIL"),
    ("Physics", "BS-PHYS"),
    ("Political Science*", "BS-POLI"),
    ("Political Science", "BA-POLI"),
    ("Psychology*", "BS-PSYC"),
    ("Psychology", "BS-PSYC"),
    ("Public Health", "BA-PUHE"),
    ("Public Relations", "BA-PUBR"),
    ("Religion, Culture, and Public Life", "BA-REST"),
    ("Sociology*", "BS-SOCI"),
    ("Sociology", "BA-SOCI"),
    ("Spanish", "BA-SPAN"),
    ("Theatre*", "BS-THEA"),
    ("Theatre", "BA-THEA"),
];

/// Resolves a major display name to its requirement code: exact match, then
/// case-insensitive, then substring in either direction.
pub fn map_major_name_to_code(major_name: &str) -> Option<&'static str> {
    let name = major_name.trim();
    if name.is_empty() {
        return None;
    }

    if let Some((_, code)) = MAJOR_CODES.iter().find(|(n, _)| *n == name) {
        return Some(code);
    }

    let lower = name.to_lowercase();
    if let Some((_, code)) = MAJOR_CODES.iter().find(|(n, _)| n.to_lowercase() == lower) {
        return Some(code);
    }

    let code = MAJOR_CODES
        .iter()
        .find(|(n, _)| {
            let n = n.to_lowercase();
            lower.contains(&n) || n.contains(&lower)
        })
        .map(|(_, code)| *code);

    if code.is_none() {
        tracing::warn!(major = major_name, "major has no requirement mapping");
    }

    code
}

/// Loose test for names that are not in the mapping table. "CS" only counts
/// as a whole word, so "Physics" or "Economics" do not match.
pub fn is_computer_science_major(major_name: &str) -> bool {
    let lower = major_name.to_lowercase();

    ["computer science", "khoury", "computing"]
        .iter()
        .any(|k| lower.contains(k))
        || lower.split(|c: char| !c.is_alphanumeric()).any(|w| w == "cs")
}

/// Whether a plan for this major is checked against the CS requirement tree.
/// Mapped majors follow their code; unmapped names fall back to the heuristic.
pub fn uses_cs_checklist(major_name: &str) -> bool {
    match map_major_name_to_code(major_name) {
        Some(code) => code == CS_MAJOR_CODE,
        None => is_computer_science_major(major_name),
    }
}
