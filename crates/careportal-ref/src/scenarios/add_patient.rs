//! Add-patient walkthrough for the doctor dashboard.
//!
//! Every lookup goes through the delayed registry calls, so the configured
//! search and add latencies apply.

use careportal_contracts::{
    directory::Patient,
    error::{PortalError, PortalResult},
};

use crate::patients::PatientRegistry;

use super::ScenarioContext;

/// Print a patient list, one account per line.
pub fn print_patients(patients: &[Patient]) {
    if patients.is_empty() {
        println!("    No patients found with that username");
        return;
    }
    for p in patients {
        println!(
            "    @{:<16} {:<16} age {:<3} {}",
            p.username, p.name, p.age, p.email
        );
    }
}

/// Run the add-patient walkthrough.
pub async fn run_scenario(ctx: &ScenarioContext) -> PortalResult<()> {
    println!("=== Add Patient ===");
    println!();

    let registry = PatientRegistry::mock(ctx.latency.clone());

    match registry.search_username_later("  ") {
        Err(PortalError::BlankInput { .. }) => {
            println!("  Search \"  \":            rejected (please enter a username to search)");
        }
        Err(e) => return Err(e),
        Ok(_) => println!("  Search \"  \":            unexpectedly accepted"),
    }
    println!();

    println!("  Search \"zzz\":");
    let none = registry.search_username_later("zzz")?.wait().await?.unwrap_or_default();
    print_patients(&none);
    println!();

    println!("  Search \"JOHN\":");
    let found = registry.search_username_later("JOHN")?.wait().await?.unwrap_or_default();
    print_patients(&found);
    println!();

    if let Some(selected) = found.first() {
        for attempt in ["first", "repeat"] {
            if let Some(notice) = registry.add_patient_later(selected.id).wait().await? {
                println!("  Add ({}):  {}", attempt, notice?);
            }
        }
    }

    match registry.add_patient(99) {
        Err(e @ PortalError::NotFound { .. }) => println!("  Add (unknown id 99):  {}", e),
        Err(e) => return Err(e),
        Ok(notice) => println!("  Add (unknown id 99):  unexpectedly succeeded: {}", notice),
    }
    println!();

    println!("  Patients under care:");
    print_patients(&registry.under_care());
    registry.close();
    println!();
    println!("  Add patient complete.");
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use careportal_core::LatencyConfig;

    use super::*;

    fn registry() -> PatientRegistry {
        PatientRegistry::mock(LatencyConfig::instant())
    }

    fn usernames(patients: &[Patient]) -> Vec<&str> {
        patients.iter().map(|p| p.username.as_str()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let registry = registry();
        assert_eq!(
            usernames(&registry.search_username("JOHN").unwrap()),
            vec!["johndoe123", "michaeljohnson"]
        );
        assert_eq!(usernames(&registry.search_username("smith").unwrap()), vec!["sarahsmith"]);
    }

    #[test]
    fn test_search_without_match_is_empty_not_error() {
        assert!(registry().search_username("zzz").unwrap().is_empty());
    }

    #[test]
    fn test_blank_search_is_rejected() {
        match registry().search_username("   ") {
            Err(PortalError::BlankInput { field }) => assert_eq!(field, "username"),
            other => panic!("expected BlankInput, got {:?}", other),
        }
    }

    #[test]
    fn test_add_patient_is_idempotent() {
        let registry = registry();
        let first = registry.add_patient(2).unwrap();
        let second = registry.add_patient(2).unwrap();

        assert_eq!(first, "Sarah Smith has been added as your patient");
        assert_eq!(first, second);
        assert_eq!(registry.under_care().len(), 1);
    }

    #[test]
    fn test_add_unknown_patient() {
        match registry().add_patient(7) {
            Err(PortalError::NotFound { kind, id }) => {
                assert_eq!(kind, "patient");
                assert_eq!(id, "7");
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delayed_calls_share_the_care_list() {
        let registry = registry();
        let found = registry
            .search_username_later("sarah")
            .unwrap()
            .wait()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(usernames(&found), vec!["sarahsmith"]);

        let notice = registry.add_patient_later(found[0].id).wait().await.unwrap().unwrap();
        assert_eq!(notice.unwrap(), "Sarah Smith has been added as your patient");
        assert_eq!(registry.clone().under_care()[0].username, "sarahsmith");
    }

    #[tokio::test]
    async fn test_close_cancels_pending_add() {
        let registry = PatientRegistry::mock(LatencyConfig {
            patient_add_ms: 60_000,
            ..LatencyConfig::instant()
        });
        let pending = registry.add_patient_later(1);
        registry.close();

        assert!(pending.wait().await.unwrap().is_none());
        assert!(registry.under_care().is_empty());
    }

    #[tokio::test]
    async fn test_walkthrough_completes() {
        let ctx = ScenarioContext::from_config(&careportal_engine::PortalConfig {
            latency: LatencyConfig::instant(),
            ..Default::default()
        })
        .unwrap();
        run_scenario(&ctx).await.unwrap();
    }
}
