use crate::core::presenter::Presenter;
use crate::domain::model::{FaqItem, FinancingScenario, GenerationStage, Persona, Presentation};
use crate::domain::ports::ContentGenerator;
use std::fmt::Write;

pub const APP_TITLE: &str = "SolarGenius Presenter";
const WORKFLOW_STEPS: [&str; 3] = ["Choose Persona", "Generate Presentation", "Generate FAQ"];

/// How the lifestyle image is referenced from a rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    None,
    Url(String),
    File(String),
}

pub fn api_key_status(available: bool) -> &'static str {
    if available {
        "AI Features: Active"
    } else {
        "AI Features: Disabled (Using Fallbacks)"
    }
}

pub fn render_workflow() -> String {
    WORKFLOW_STEPS
        .iter()
        .enumerate()
        .map(|(i, step)| format!("({}) {}", i + 1, step))
        .collect::<Vec<_>>()
        .join(" -> ")
}

pub fn render_personas(personas: &[Persona]) -> String {
    let mut out = String::from("## 1. Select Customer Persona\n\n");
    for persona in personas {
        let _ = writeln!(
            out,
            "- **{}** (`{}`): {}",
            persona.name, persona.id, persona.description
        );
    }
    out
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn bullet_cell(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {}", escape_cell(item)))
        .collect::<Vec<_>>()
        .join("<br>")
}

pub fn render_financing_table(scenarios: &[FinancingScenario]) -> String {
    let mut out = String::from("| Option | Pros | Cons | Best For |\n|---|---|---|---|\n");
    for scenario in scenarios {
        let _ = writeln!(
            out,
            "| **{}** | {} | {} | {} |",
            escape_cell(&scenario.option),
            bullet_cell(&scenario.pros),
            bullet_cell(&scenario.cons),
            escape_cell(&scenario.best_for)
        );
    }
    out
}

pub fn render_faq(faq: &[FaqItem]) -> String {
    let mut out = String::new();
    for item in faq {
        let _ = writeln!(out, "#### {}\n\n{}\n", item.question, item.answer);
    }
    out
}

fn card(out: &mut String, title: &str, body: &str) {
    let _ = writeln!(out, "## {}\n\n{}\n", title, body.trim_end());
}

fn spinner(stage: GenerationStage) -> String {
    format!("_{}_", stage.spinner_message())
}

fn describe_image(image_url: &str) -> String {
    match image_url.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest.split_once(',').unwrap_or((rest, ""));
            let mime = header.trim_end_matches(";base64");
            format!(
                "_Generated image ({}, ~{} KB); written to disk on export._",
                mime,
                payload.len() * 3 / 4 / 1024
            )
        }
        None => format!("![Happy homeowners with solar panels]({})", image_url),
    }
}

/// Terminal view of the presenter: header, workflow, and one card per step.
pub fn render_view<G: ContentGenerator>(presenter: &Presenter<G>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "# {}\n\n`{}`\n\n{}\n",
        APP_TITLE,
        api_key_status(presenter.api_key_available()),
        render_workflow()
    );

    if !presenter.has_active_prompt() {
        card(
            &mut out,
            "Welcome, Solar Agent!",
            "Follow the steps above to generate a presentation.",
        );
        return out;
    }

    if let Some(error) = presenter.error() {
        let _ = writeln!(out, "> **Error:** {}\n", error);
    }

    let loading = presenter.loading();
    let presentation = presenter.presentation();

    let benefits = if loading.benefits {
        spinner(GenerationStage::Benefits)
    } else {
        presentation.benefits.clone()
    };
    card(&mut out, "2. Solar Technology Benefits", &benefits);

    let image = if loading.image {
        spinner(GenerationStage::Image)
    } else if presentation.image_url.is_empty() {
        String::new()
    } else {
        describe_image(&presentation.image_url)
    };
    card(&mut out, "3. Lifestyle Imagery", &image);

    let financing = if loading.financing {
        spinner(GenerationStage::Financing)
    } else {
        render_financing_table(&presentation.financing_scenarios)
    };
    card(&mut out, "4. Comparative Financing Scenarios", &financing);

    let faq = if !presentation.faq.is_empty() {
        render_faq(&presentation.faq)
    } else if loading.faq {
        spinner(GenerationStage::Faq)
    } else {
        "_Run again with `--faq` to generate common questions._".to_string()
    };
    card(&mut out, "5. Frequently Asked Questions", &faq);

    out
}

/// Standalone document written on export.
pub fn render_document(presentation: &Presentation, image: &ImageRef) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", APP_TITLE);

    if let Some(source) = &presentation.source {
        let _ = writeln!(out, "**Customer:** {}\n", source.label());
        let _ = writeln!(out, "> {}\n", source.prompt());
    }
    if let Some(generated_at) = presentation.generated_at {
        let _ = writeln!(out, "_Generated {}_\n", generated_at.format("%Y-%m-%d %H:%M UTC"));
    }

    card(&mut out, "Solar Technology Benefits", &presentation.benefits);

    let image_markdown = match image {
        ImageRef::None => String::new(),
        ImageRef::Url(url) | ImageRef::File(url) => {
            format!("![Happy homeowners with solar panels]({})", url)
        }
    };
    card(&mut out, "Lifestyle Imagery", &image_markdown);

    if !presentation.financing_scenarios.is_empty() {
        card(
            &mut out,
            "Comparative Financing Scenarios",
            &render_financing_table(&presentation.financing_scenarios),
        );
    }
    if !presentation.faq.is_empty() {
        card(
            &mut out,
            "Frequently Asked Questions",
            &render_faq(&presentation.faq),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{fallback_faq, fallback_financing_scenarios, personas};
    use crate::domain::model::PromptSource;

    #[test]
    fn test_api_key_status_text() {
        assert_eq!(api_key_status(true), "AI Features: Active");
        assert_eq!(
            api_key_status(false),
            "AI Features: Disabled (Using Fallbacks)"
        );
    }

    #[test]
    fn test_workflow_lists_three_steps() {
        assert_eq!(
            render_workflow(),
            "(1) Choose Persona -> (2) Generate Presentation -> (3) Generate FAQ"
        );
    }

    #[test]
    fn test_financing_table_rows() {
        let table = render_financing_table(&fallback_financing_scenarios());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "| Option | Pros | Cons | Best For |");
        assert!(lines[2].starts_with("| **Solar Loan** | • You own the system<br>• Eligible"));
    }

    #[test]
    fn test_financing_table_escapes_pipes() {
        let scenario = FinancingScenario {
            option: "Lease | PPA".to_string(),
            pros: vec![],
            cons: vec![],
            best_for: "Renters".to_string(),
        };
        let table = render_financing_table(&[scenario]);
        assert!(table.contains("Lease \\| PPA"));
    }

    #[test]
    fn test_render_personas() {
        let listing = render_personas(&personas());
        assert!(listing.contains("**Eco-Warrior** (`eco_warrior`)"));
        assert_eq!(listing.lines().filter(|l| l.starts_with("- ")).count(), 3);
    }

    #[test]
    fn test_describe_image_summarizes_data_urls() {
        let text = describe_image("data:image/jpeg;base64,aGVsbG8=");
        assert!(text.starts_with("_Generated image (image/jpeg"));
        assert!(!text.contains("aGVsbG8="));
    }

    #[test]
    fn test_render_document_sections() {
        let presentation = Presentation {
            source: Some(PromptSource::Custom("Retired couple".to_string())),
            benefits: "Predictable bills.".to_string(),
            image_url: String::new(),
            financing_scenarios: fallback_financing_scenarios(),
            faq: fallback_faq(),
            generated_at: None,
        };

        let doc = render_document(&presentation, &ImageRef::File("lifestyle.jpg".to_string()));
        assert!(doc.contains("**Customer:** Custom customer data"));
        assert!(doc.contains("> Retired couple"));
        assert!(doc.contains("## Solar Technology Benefits\n\nPredictable bills."));
        assert!(doc.contains("(lifestyle.jpg)"));
        assert!(doc.contains("#### What happens on cloudy days or at night?"));
    }
}
