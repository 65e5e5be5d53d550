//! Symptom checker walkthrough.
//!
//! Submits a handful of descriptions to one analyzer panel and prints each
//! result set the way the results card renders it.

use std::sync::Arc;

use careportal_contracts::{
    diagnosis::{DiagnosisCandidate, DIAGNOSIS_DISCLAIMER},
    error::{PortalError, PortalResult},
};
use careportal_core::SymptomSession;
use careportal_transcript::Transcript;

use super::ScenarioContext;

const DESCRIPTIONS: &[&str] = &[
    "Fever headache and chills since yesterday",
    "Dry cough chest pain when breathing deeply",
    "I have a rash itching on both forearms",
    "Headache and fever",
    "Broken toe",
];

/// Analyze a single description and return the candidates.
pub async fn analyze(ctx: &ScenarioContext, description: &str) -> PortalResult<Vec<DiagnosisCandidate>> {
    let session = SymptomSession::open(
        Arc::clone(&ctx.matcher),
        Arc::new(Transcript::new()),
        ctx.latency.symptom_analysis(),
    )?;
    let analysis = session.submit(description)?.wait().await?;
    Ok(analysis.map(|a| a.results).unwrap_or_default())
}

/// Print a result set with match percentages and recommendations.
pub fn print_candidates(candidates: &[DiagnosisCandidate]) {
    for candidate in candidates {
        println!(
            "    {:<20} {:>3}% match",
            candidate.disease,
            candidate.match_percent()
        );
        println!("      {}", candidate.description);
        for recommendation in &candidate.recommendations {
            println!("      - {}", recommendation);
        }
    }
}

/// Run the symptom checker walkthrough.
pub async fn run_scenario(ctx: &ScenarioContext) -> PortalResult<()> {
    println!("=== Symptom Checker ===");
    println!();

    let transcript = Transcript::new();
    let session = SymptomSession::open(
        Arc::clone(&ctx.matcher),
        Arc::new(transcript.clone()),
        ctx.latency.symptom_analysis(),
    )?;

    for description in DESCRIPTIONS {
        println!("  Symptoms: \"{}\"", description);
        let pending = session.submit(description)?;

        // The input stays locked while the analysis runs.
        let extra = match session.submit("a second description") {
            Err(PortalError::Busy { reason }) => {
                println!("  Second submit:          rejected ({})", reason);
                None
            }
            Err(e) => return Err(e),
            Ok(extra) => {
                println!("  Second submit:          accepted (first analysis already finished)");
                Some(extra)
            }
        };

        if let Some(analysis) = pending.wait().await? {
            print_candidates(&analysis.results);
        }
        if let Some(extra) = extra {
            extra.wait().await?;
        }
        println!();
    }

    println!("  {}", DIAGNOSIS_DISCLAIMER);
    println!();
    println!(
        "  Transcript order:       {} ({} message(s))",
        if transcript.verify_order() { "VERIFIED" } else { "BROKEN" },
        transcript.len()
    );
    session.close();
    println!("  Symptom checker complete.");
    println!();
    Ok(())
}
