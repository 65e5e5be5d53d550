//! Simulated directory data for the CarePortal reference runtime.
//!
//! All records are hardcoded and fictional. Nothing here contacts an external
//! system; these functions stand in for the provider and patient databases a
//! real portal would query.

use careportal_contracts::directory::{Doctor, Patient, RecordId};

// ── Doctors (mock) ────────────────────────────────────────────────────────────

/// The five providers listed in the find-doctors directory.
///
/// Dr. Sarah Johnson starts out saved; everyone else does not.
pub fn doctors() -> Vec<Doctor> {
    vec![
        doctor(
            1,
            "Dr. Emma Wilson",
            "Cardiologist",
            "City General Hospital",
            "123 Medical Dr, New York, NY",
            "1.2 miles away",
            ("(555) 123-4567", "dr.wilson@example.com"),
            (4.9, 142),
            false,
        ),
        doctor(
            2,
            "Dr. Michael Chen",
            "Dermatologist",
            "Westside Medical Center",
            "456 Health Ave, New York, NY",
            "2.5 miles away",
            ("(555) 987-6543", "dr.chen@example.com"),
            (4.7, 89),
            false,
        ),
        doctor(
            3,
            "Dr. Sarah Johnson",
            "Neurologist",
            "Metropolitan Hospital",
            "789 Wellness Blvd, New York, NY",
            "3.8 miles away",
            ("(555) 456-7890", "dr.johnson@example.com"),
            (4.8, 113),
            true,
        ),
        doctor(
            4,
            "Dr. James Rodriguez",
            "Orthopedic Surgeon",
            "Harbor View Medical Center",
            "321 Healthcare St, New York, NY",
            "4.1 miles away",
            ("(555) 234-5678", "dr.rodriguez@example.com"),
            (4.6, 78),
            false,
        ),
        doctor(
            5,
            "Dr. Lisa Wang",
            "Pediatrician",
            "Children's General Hospital",
            "567 Child Care Ave, New York, NY",
            "1.8 miles away",
            ("(555) 345-6789", "dr.wang@example.com"),
            (4.9, 156),
            false,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn doctor(
    id: RecordId,
    name: &str,
    specialty: &str,
    hospital: &str,
    address: &str,
    distance: &str,
    (phone, email): (&str, &str),
    (rating, reviews): (f32, u32),
    saved: bool,
) -> Doctor {
    Doctor {
        id,
        name: name.to_string(),
        specialty: specialty.to_string(),
        hospital: hospital.to_string(),
        address: address.to_string(),
        distance: distance.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        rating,
        reviews,
        saved,
    }
}

// ── Patients (mock) ───────────────────────────────────────────────────────────

/// Patient accounts a doctor can find by username.
pub fn patients() -> Vec<Patient> {
    vec![
        patient(1, "johndoe123", "John Doe", 34, "john.doe@example.com"),
        patient(2, "sarahsmith", "Sarah Smith", 28, "sarah.smith@example.com"),
        patient(3, "michaeljohnson", "Michael Johnson", 45, "michael.j@example.com"),
    ]
}

fn patient(id: RecordId, username: &str, name: &str, age: u32, email: &str) -> Patient {
    Patient {
        id,
        username: username.to_string(),
        name: name.to_string(),
        age,
        email: email.to_string(),
    }
}
