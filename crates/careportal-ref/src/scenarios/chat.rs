//! Chat walkthroughs for the patient and doctor dashboards.
//!
//! Both dashboards share one chat surface; only the greeting differs. The
//! script waits for each reply before typing the next line, the way a person
//! would.

use std::sync::Arc;

use careportal_contracts::{
    error::{PortalError, PortalResult},
    message::{AttachmentKind, UserRole},
};
use careportal_core::ChatSession;
use careportal_transcript::Transcript;

use super::{print_message, ScenarioContext};

/// One scripted user turn.
pub type ScriptLine<'a> = (&'a str, Option<AttachmentKind>);

const PATIENT_SCRIPT: &[ScriptLine<'static>] = &[
    ("I've had a headache for two days now.", None),
    ("It gets worse in the evening.", None),
    ("Here is a photo of the rash on my arm.", Some(AttachmentKind::Image)),
];

const DOCTOR_SCRIPT: &[ScriptLine<'static>] = &[
    ("Can you summarize my patient's recent symptoms?", None),
    ("Attaching the latest lab results.", Some(AttachmentKind::Document)),
];

/// Open a chat for `role`, play `lines` one by one and return the transcript.
///
/// The session is closed before returning.
pub async fn converse(
    ctx: &ScenarioContext,
    role: UserRole,
    lines: &[ScriptLine<'_>],
) -> PortalResult<Transcript> {
    let transcript = Transcript::new();
    let session = ChatSession::open(
        role,
        Arc::clone(&ctx.selector),
        Arc::new(transcript.clone()),
        ctx.latency.chat_reply(),
    )?;

    for (text, attachment) in lines {
        session.send(text, *attachment)?.wait().await?;
    }

    session.close();
    Ok(transcript)
}

/// Print every message of `transcript` in order.
pub fn print_transcript(transcript: &Transcript) {
    for message in transcript.messages() {
        print_message(&message);
    }
}

/// Run the patient chat walkthrough.
pub async fn run_patient_chat(ctx: &ScenarioContext) -> PortalResult<()> {
    println!("=== Patient Chat ===");
    println!();
    run_chat(ctx, UserRole::Patient, PATIENT_SCRIPT).await?;
    println!("  Patient chat complete.");
    println!();
    Ok(())
}

/// Run the doctor chat walkthrough.
pub async fn run_doctor_chat(ctx: &ScenarioContext) -> PortalResult<()> {
    println!("=== Doctor Chat ===");
    println!();
    run_chat(ctx, UserRole::Doctor, DOCTOR_SCRIPT).await?;
    println!("  Doctor chat complete.");
    println!();
    Ok(())
}

async fn run_chat(ctx: &ScenarioContext, role: UserRole, script: &[ScriptLine<'_>]) -> PortalResult<()> {
    let transcript = converse(ctx, role, script).await?;
    print_transcript(&transcript);
    println!();
    println!(
        "  Transcript order:       {} ({} message(s))",
        if transcript.verify_order() { "VERIFIED" } else { "BROKEN" },
        transcript.len()
    );

    // Blank input never reaches the transcript.
    let probe = Transcript::new();
    let session = ChatSession::open(
        role,
        Arc::clone(&ctx.selector),
        Arc::new(probe.clone()),
        ctx.latency.chat_reply(),
    )?;
    match session.send("   ", None) {
        Err(PortalError::BlankInput { field }) => {
            println!("  Blank send:             rejected ({} must not be blank)", field);
        }
        Err(e) => return Err(e),
        Ok(_) => println!("  Blank send:             unexpectedly accepted"),
    }

    // Leaving the page with a reply still pending drops that reply.
    let pending = session.send("Are you still there?", None)?;
    session.close();
    let outcome = match pending.wait().await? {
        None => "cancelled, nothing appended",
        Some(_) => "already delivered before close",
    };
    println!("  Reply pending at close: {}", outcome);
    println!("  Probe transcript:       {} message(s)", probe.len());
    println!();
    Ok(())
}
