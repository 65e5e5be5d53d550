//! Find-doctors and saved-doctors walkthrough.

use careportal_contracts::{directory::Doctor, error::PortalResult};

use crate::directory::DoctorDirectory;

/// Print a search result list, one doctor per line.
pub fn print_doctors(doctors: &[&Doctor]) {
    if doctors.is_empty() {
        println!("    No doctors found matching your criteria");
        return;
    }
    for d in doctors {
        println!(
            "    {} {:<20} {:<19} {:<27} {} ({} reviews) {}",
            if d.saved { "*" } else { " " },
            d.name,
            d.specialty,
            d.hospital,
            d.rating,
            d.reviews,
            d.distance
        );
    }
}

/// Run the find-doctors walkthrough.
pub fn run_scenario() -> PortalResult<()> {
    println!("=== Find Doctors ===");
    println!();

    let mut directory = DoctorDirectory::mock();

    println!("  Specialties: {}", directory.specialties().join(", "));
    println!();

    let searches: [(&str, Option<&str>); 4] = [
        ("", None),
        ("CARDIO", None),
        ("hospital", Some("Neurologist")),
        ("dentist", None),
    ];
    for (term, specialty) in searches {
        println!(
            "  Search \"{}\" in {}:",
            term,
            specialty.unwrap_or("All Specialties")
        );
        print_doctors(&directory.search(term, specialty));
        println!();
    }

    for id in [1, 3] {
        let toggle = directory.toggle_saved(id)?;
        println!("  {}", toggle.notice);
    }
    println!();

    println!("  Saved doctors:");
    for d in directory.saved() {
        println!("    {} ({})  {}  {}", d.name, d.specialty, d.phone, d.email);
    }
    println!();
    println!("  Find doctors complete.");
    println!();
    Ok(())
}
