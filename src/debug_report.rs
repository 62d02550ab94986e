use contractor::requirements;
use contractor::{ConfigNode, Diagnostic, LoadReport, Localizer, TypeRegistry};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RED: &str = "\x1b[31m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub struct ReportOptions {
    pub color: bool,
    pub show_saved: bool,
}

pub fn print_report(report: &LoadReport, registry: &TypeRegistry, localizer: &dyn Localizer, options: &ReportOptions) {
    let palette = ansi::Palette::new(options.color);

    println!("\n{}", palette.paint("━━━ Registry ━━━", ansi::GRAY));
    print_registry(registry, &palette);

    println!("\n{}", palette.paint("━━━ Requirements ━━━", ansi::GRAY));
    let mut any = false;
    for requirement in report.requirements() {
        any = true;
        let base = requirement.base();
        println!(
            "  {} {} {}",
            palette.paint("✓", ansi::GREEN),
            palette.bold(&base.name),
            palette.dim(format!("({})", base.kind))
        );
        println!("      {}", requirement.title(registry, localizer));

        if options.show_saved {
            let mut node = ConfigNode::new("REQUIREMENT");
            requirements::save(requirement, &mut node);
            for (key, value) in node.iter() {
                println!("      {}", palette.dim(format!("{key} = {value}")));
            }
        }
    }
    if !any {
        println!("{}", palette.dim("  none"));
    }

    println!("\n{}", palette.paint("━━━ Parameters ━━━", ansi::GRAY));
    let mut any = false;
    for factory in report.parameters() {
        any = true;
        let base = factory.base();
        let title = base.title.as_deref().map(|t| format!(" \"{t}\"")).unwrap_or_default();
        println!(
            "  {} {} {}{}",
            palette.paint("✓", ansi::GREEN),
            palette.bold(&base.name),
            palette.dim(format!("({})", base.kind)),
            title
        );
    }
    if !any {
        println!("{}", palette.dim("  none"));
    }

    if !report.skipped.is_empty() {
        println!("\n{}", palette.paint("━━━ Skipped ━━━", ansi::GRAY));
        for name in &report.skipped {
            println!("  {} {}", palette.paint("•", ansi::YELLOW), name);
        }
    }

    if !report.is_valid() {
        println!("\n{}", palette.paint("━━━ Diagnostics ━━━", ansi::GRAY));
        for failure in &report.failures {
            println!(
                "  {} {} {}",
                palette.paint("✗", ansi::RED),
                palette.bold(&failure.owner),
                palette.dim(format!("({} error(s))", failure.diagnostics.len()))
            );
            for diagnostic in &failure.diagnostics {
                println!("      {}", describe(diagnostic));
            }
        }
    }

    println!("\n{}", palette.paint("━━━ Summary ━━━", ansi::GRAY));
    let loaded = report.definitions.len();
    let failed = report.failures.len();
    println!(
        "  Loaded: {}  │  Failed: {}  │  Elapsed: {}",
        palette.paint(loaded.to_string(), ansi::GREEN),
        palette.paint(failed.to_string(), if failed == 0 { ansi::GREEN } else { ansi::RED }),
        palette.paint(format!("{:?}", report.elapsed), ansi::CYAN),
    );
    println!();
}

fn print_registry(registry: &TypeRegistry, palette: &ansi::Palette) {
    let declarative = registry.declarative_types();
    if declarative.is_empty() {
        println!("{}", palette.dim("  no declarative types"));
    }
    for ty in declarative {
        let marker = if ty.valid { palette.paint("•", ansi::CYAN) } else { palette.paint("•", ansi::YELLOW) };
        println!("  {} {} {}", marker, ty.name, palette.dim(format!("\"{}\"", ty.generic_title)));
    }
}

/// Diagnostic text without the owner prefix (the owner is the heading).
fn describe(diagnostic: &Diagnostic) -> String {
    let text = diagnostic.to_string();
    let prefix = format!("{}: ", diagnostic.owner());
    if let Some(rest) = text.strip_prefix(&prefix) {
        return rest.to_string();
    }
    text
}
