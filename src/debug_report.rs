use wordforge::{CasePattern, ExpansionRun, Operation, PassMetrics, Position, Rule};

/// What a piece of report text is, mapped to one ANSI style.
#[derive(Clone, Copy)]
enum Tone {
    Title,
    Banner,
    Operation,
    Password,
    Good,
    Note,
    Muted,
}

impl Tone {
    fn sgr(self) -> &'static str {
        match self {
            Tone::Title => "1;36",
            Tone::Banner => "90",
            Tone::Operation => "34",
            Tone::Password => "1;32",
            Tone::Good => "32",
            Tone::Note => "33",
            Tone::Muted => "2",
        }
    }
}

/// Paints report text when color is on; passes it through otherwise.
struct Palette {
    enabled: bool,
}

impl Palette {
    fn tint(&self, text: impl AsRef<str>, tone: Tone) -> String {
        let text = text.as_ref();
        if self.enabled { format!("\x1b[{}m{text}\x1b[0m", tone.sgr()) } else { text.to_string() }
    }

    fn banner(&self, title: &str) {
        println!("\n{}", self.tint(format!("━━━ {title} ━━━"), Tone::Banner));
    }
}

pub fn print_run(rule: &Rule, run: &ExpansionRun, color: bool, show: usize) {
    let palette = Palette { enabled: color };
    println!("\n{}", palette.tint(format!("⚙  Expanding: \"{}\"", rule.source), Tone::Title));

    palette.banner("Operations");
    print_operations(rule, &palette);

    palette.banner("Passes");
    if run.metrics.passes.is_empty() {
        println!("{}", palette.tint("  No passes ran", Tone::Muted));
        println!("\n{}", palette.tint("Possible reasons:", Tone::Note));
        println!("  • The rule uses date tokens but no --date was given");
    }
    for (idx, pass) in run.metrics.passes.iter().enumerate() {
        print_pass(idx, pass, rule, &palette);
    }

    palette.banner("Passwords");
    if run.passwords.is_empty() {
        println!("{}", palette.tint("  No passwords produced", Tone::Muted));
    } else {
        print_passwords(run, show, &palette);
    }

    palette.banner("Timing");
    println!(
        "  Total: {}  │  Passes: {}  │  Peak width: {}",
        palette.tint(format!("{:?}", run.metrics.total), Tone::Good),
        palette.tint(run.metrics.passes.len().to_string(), Tone::Operation),
        palette.tint(run.metrics.peak_width().to_string(), Tone::Muted),
    );
    println!();
}

fn print_operations(rule: &Rule, palette: &Palette) {
    for (idx, op) in rule.operations.iter().enumerate() {
        println!(
            "  {} {} {}",
            palette.tint(format!("[{}]", idx), Tone::Banner),
            palette.tint(op.name(), Tone::Operation),
            palette.tint(describe(op), Tone::Muted),
        );
    }
    if rule.join_with_space {
        println!("  {}", palette.tint("(slots joined with a space)", Tone::Muted));
    }
}

fn print_pass(idx: usize, pass: &PassMetrics, rule: &Rule, palette: &Palette) {
    let label = match &pass.date {
        Some(date) => format!("Pass {} ({}):", idx, date),
        None => format!("Pass {}:", idx),
    };

    println!(
        "  {} {}  {}",
        palette.tint(label, Tone::Operation),
        if pass.produced > 0 {
            palette.tint(format!("✓ {} passwords", pass.produced), Tone::Good)
        } else {
            palette.tint(format!("✗ {} passwords", pass.produced), Tone::Muted)
        },
        palette.tint(format!("{:?}", pass.duration), Tone::Muted),
    );

    let widths: Vec<String> = rule
        .operations
        .iter()
        .zip(&pass.layers)
        .map(|(op, width)| format!("{}={}", op.name(), width))
        .collect();
    println!("    {}", palette.tint(widths.join(" → "), Tone::Muted));
}

fn print_passwords(run: &ExpansionRun, show: usize, palette: &Palette) {
    let mut sorted: Vec<&String> = run.passwords.iter().collect();
    sorted.sort_unstable();

    for (idx, password) in sorted.iter().take(show).enumerate() {
        println!(
            "  {} {} {}",
            palette.tint(format!("[{}]", idx), Tone::Banner),
            palette.tint(password.as_str(), Tone::Password),
            palette.tint(format!("len {}", password.chars().count()), Tone::Note),
        );
    }
    if sorted.len() > show {
        println!("  {}", palette.tint(format!("... +{} more", sorted.len() - show), Tone::Muted));
    }
}

fn describe(op: &Operation) -> String {
    match op {
        Operation::Literal { value } => format!("{:?}", value),
        Operation::PersonalString { case, pool_index }
        | Operation::PersonalStringLeet { case, pool_index }
        | Operation::FirstCharacter { case, pool_index } => {
            format!("case {} │ pool #{}", describe_case(case), pool_index)
        }
        _ => String::new(),
    }
}

fn describe_case(case: &CasePattern) -> String {
    match case {
        CasePattern::Upper => "upper".to_string(),
        CasePattern::Lower => "lower".to_string(),
        CasePattern::Verbatim => "as written".to_string(),
        CasePattern::Positions(positions) => {
            let list: Vec<String> = positions
                .iter()
                .map(|p| match p {
                    Position::Index(n) => n.to_string(),
                    Position::Last => "L".to_string(),
                })
                .collect();
            format!("upper at {}", list.join(","))
        }
    }
}
