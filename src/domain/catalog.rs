//! Built-in customer personas and the canned content used whenever live
//! generation is unavailable.

use crate::domain::model::{FaqItem, FinancingScenario, Persona};

const PERSONA_TABLE: [(&str, &str, &str, &str); 3] = [
    (
        "budget_family",
        "Budget-Conscious Family",
        "Focuses on long-term savings and energy independence.",
        "A family focused on saving money with a tight budget.",
    ),
    (
        "eco_warrior",
        "Eco-Warrior",
        "Prioritizes environmental impact and sustainability.",
        "An environmentally conscious individual who wants to reduce their carbon footprint.",
    ),
    (
        "tech_enthusiast",
        "Tech Enthusiast",
        "Interested in the latest technology, smart home integration, and performance metrics.",
        "A tech-savvy person interested in the latest gadgets and home automation.",
    ),
];

pub const FALLBACK_BENEFITS: &str = "Solar panels provide significant long-term savings on electricity bills by generating your own clean energy. This reduces reliance on the grid, offering energy independence and protection against rising utility costs. Additionally, solar energy is environmentally friendly, reducing your carbon footprint and contributing to a healthier planet. Modern solar systems are durable, require minimal maintenance, and can increase your property value.";

pub const FALLBACK_IMAGE_URL: &str = "https://picsum.photos/1024/768?random=1";

pub fn personas() -> Vec<Persona> {
    PERSONA_TABLE
        .iter()
        .map(|(id, name, description, prompt)| Persona {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            prompt: prompt.to_string(),
        })
        .collect()
}

pub fn find_persona(id: &str) -> Option<Persona> {
    personas().into_iter().find(|persona| persona.id == id)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

pub fn fallback_financing_scenarios() -> Vec<FinancingScenario> {
    vec![
        FinancingScenario {
            option: "Solar Loan".to_string(),
            pros: strings(&[
                "You own the system",
                "Eligible for tax credits",
                "Fixed monthly payments",
            ]),
            cons: strings(&["Requires good credit", "Responsible for maintenance"]),
            best_for: "Homeowners who want to own their system and maximize financial returns."
                .to_string(),
        },
        FinancingScenario {
            option: "Cash Purchase".to_string(),
            pros: strings(&["Highest ROI", "No monthly payments", "Full ownership benefits"]),
            cons: strings(&["High upfront cost"]),
            best_for: "Those with available capital seeking the best long-term investment."
                .to_string(),
        },
        FinancingScenario {
            option: "Lease / PPA".to_string(),
            pros: strings(&[
                "Low or no upfront cost",
                "No maintenance responsibility",
                "Predictable energy costs",
            ]),
            cons: strings(&[
                "Do not own the system",
                "Not eligible for tax credits",
                "Complex contracts",
            ]),
            best_for: "Customers wanting immediate savings with minimal initial investment."
                .to_string(),
        },
    ]
}

pub fn fallback_faq() -> Vec<FaqItem> {
    vec![
        FaqItem {
            question: "How much can I save with solar panels?".to_string(),
            answer: "Savings vary based on your energy consumption, local utility rates, and system size. Most homeowners see a significant reduction in their monthly electricity bills.".to_string(),
        },
        FaqItem {
            question: "What happens on cloudy days or at night?".to_string(),
            answer: "Your system produces less energy on cloudy days and none at night. However, you remain connected to the grid to draw power when needed. Battery storage systems can also provide power during these times.".to_string(),
        },
        FaqItem {
            question: "Do solar panels require maintenance?".to_string(),
            answer: "Solar panels are very durable and require little maintenance. We recommend an occasional cleaning and an annual inspection to ensure optimal performance.".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_persona_ids_are_unique() {
        let all = personas();
        let ids: HashSet<_> = all.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(all.len(), 3);
        assert_eq!(ids.len(), all.len());
    }

    #[test]
    fn test_find_persona() {
        let persona = find_persona("eco_warrior").unwrap();
        assert_eq!(persona.name, "Eco-Warrior");
        assert!(find_persona("unknown").is_none());
    }

    #[test]
    fn test_fallback_content_shape() {
        let scenarios = fallback_financing_scenarios();
        let options: Vec<_> = scenarios.iter().map(|s| s.option.as_str()).collect();
        assert_eq!(options, vec!["Solar Loan", "Cash Purchase", "Lease / PPA"]);
        assert_eq!(fallback_faq().len(), 3);
        assert!(FALLBACK_IMAGE_URL.starts_with("https://"));
    }
}
