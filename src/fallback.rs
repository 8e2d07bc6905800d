//! Deterministic locally generated content, served whenever a provider is
//! unusable. Known terms get authored explanations; everything else gets a
//! generic template with the failure reason noted in the definition.

use crate::models::Explanation;

// Authored explanations for common legal terms.
fn dictionary_entry(term: &str) -> Option<Explanation> {
    let (definition, example, implications): (&str, &str, [&str; 3]) = match term {
        "force majeure" => (
            "Force majeure is a clause in contracts that frees both parties from liability or \
             obligation when an extraordinary event or circumstance beyond their control prevents \
             one or both parties from fulfilling their obligations under the contract.",
            "For example, if a hurricane destroys a factory that was under contract to produce \
             goods, the force majeure clause might excuse the factory from fulfilling its \
             obligations.",
            [
                "Force majeure clauses must be specifically drafted and cannot be assumed to cover all unforeseen events",
                "The clause typically lists specific events like natural disasters, wars, or acts of God",
                "Whether COVID-19 qualifies as force majeure has been heavily litigated with mixed results",
            ],
        ),
        "indemnity clause" => (
            "An indemnity clause is a contractual obligation where one party agrees to compensate \
             another party for any losses or damages that arise from the contract or from \
             specified circumstances.",
            "In a construction contract, the contractor might agree to indemnify the property \
             owner against any claims arising from the contractor's work on the property.",
            [
                "Indemnity clauses can create significant financial liability",
                "They are often heavily negotiated in contracts",
                "The scope of indemnity should be clearly defined to avoid ambiguity",
            ],
        ),
        "non-disclosure agreement" => (
            "A non-disclosure agreement (NDA) is a legally binding contract that establishes a \
             confidential relationship between parties to protect any type of confidential and \
             proprietary information or trade secrets.",
            "When a company shares its business plans with a potential partner, they might sign \
             an NDA to prevent the partner from sharing those plans with competitors.",
            [
                "NDAs must clearly define what constitutes confidential information",
                "They typically have time limitations on the confidentiality obligation",
                "Violations can result in lawsuits and significant damages",
            ],
        ),
        "liquidated damages" => (
            "Liquidated damages are a predetermined amount of money that must be paid as damages \
             for failure to perform under a contract, when actual damages would be difficult to \
             calculate.",
            "A construction contract might include a liquidated damages clause requiring the \
             contractor to pay $1,000 for each day of delay beyond the agreed completion date.",
            [
                "Liquidated damages must be a reasonable estimate of actual damages",
                "If deemed a penalty rather than reasonable estimate, courts may not enforce them",
                "They provide certainty about liability for contract breaches",
            ],
        ),
        "arbitration clause" => (
            "An arbitration clause is a provision in a contract that requires the parties to \
             resolve disputes through arbitration rather than through court litigation.",
            "An employment contract might include an arbitration clause requiring any disputes \
             about employment termination to be resolved through binding arbitration.",
            [
                "Arbitration is generally faster and less formal than court litigation",
                "Arbitration decisions are typically binding with limited appeal rights",
                "Some jurisdictions have specific requirements for enforceable arbitration clauses",
            ],
        ),
        "statute of limitations" => (
            "A statute of limitations is a law that sets the maximum time after an event within \
             which legal proceedings may be initiated.",
            "If a state has a 3-year statute of limitations for personal injury claims, someone \
             injured in a car accident must file suit within 3 years of the accident.",
            [
                "Missing the statute of limitations deadline usually bars the claim completely",
                "Different types of claims have different limitation periods",
                "The clock typically starts ticking when the injury is discovered or should have been discovered",
            ],
        ),
        _ => return None,
    };

    Some(Explanation {
        definition: definition.to_string(),
        example: example.to_string(),
        implications: implications.iter().map(|s| s.to_string()).collect(),
    })
}

// Generate an explanation without touching any provider. The reason only
// shows up in the generic template, never in dictionary entries.
pub fn generate(term: &str, reason: &str) -> Explanation {
    if let Some(entry) = dictionary_entry(&term.trim().to_lowercase()) {
        return entry;
    }

    Explanation {
        definition: format!(
            "{term} is a legal term that refers to concepts in the justice system. (Note: {reason})"
        ),
        example: format!("For example, {term} might apply in situations where..."),
        implications: vec![
            "Consult legal resources for more specific information".to_string(),
            "The application of this term may vary by jurisdiction".to_string(),
            "Consider seeking professional legal advice for your specific situation".to_string(),
        ],
    }
}

// Mock simplification for when the text-generation provider is unusable.
// Embeds a short preview of the input so the user can tell what was processed.
pub fn simplify_fallback(text: &str, reason: &str) -> String {
    let preview: String = text.chars().take(100).collect();
    let ellipsis = if text.chars().count() > 100 { "..." } else { "" };
    format!(
        "Simplified version (generated locally - {reason}):\n\n\
         This document sets out an agreement between the parties. Each party promises to keep \
         shared confidential information private and to use it only for the purposes of the \
         agreement, not for personal gain or disclosure to others.\n\n\
         Original text preview: \"{preview}{ellipsis}\""
    )
}
