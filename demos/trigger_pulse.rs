//! Trigger Pulse
//!
//! This example shows a trigger machine: every state is a trigger, so
//! settling on one immediately rebounds to a baseline.
//!
//! Key concepts:
//! - `Rebound::State` names the baseline explicitly
//! - Two applies in the frame that settles on a trigger state
//! - Animated rebounds when a transition back exists
//! - Checkpointing an engine mid-pulse and restoring it
//!
//! Run with: cargo run --example trigger_pulse

use blendstate::{
    attributes, AttributeSet, Checkpoint, Rebound, StateMachine, StateMachineBuilder,
    StateMachineDelegate,
};
use std::cell::RefCell;
use std::rc::Rc;

struct Printer;

impl StateMachineDelegate for Printer {
    fn apply(&mut self, attributes: &AttributeSet) {
        let scale = attributes.get("scale").and_then(|v| v.scalar());
        let glow = attributes.get("glow").and_then(|v| v.scalar());
        println!("  apply: scale {scale:?}, glow {glow:?}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Trigger Pulse ===\n");

    let mut machine = StateMachineBuilder::new("idle")
        .state("idle", attributes! { "scale" => 1.0, "glow" => 0.0 })
        .state("pressed", attributes! { "scale" => 0.9, "glow" => 0.2 })
        .state("flash", attributes! { "scale" => 1.05, "glow" => 1.0 })
        .transition("flash", "idle", 0.25, "cubic-ease-out")
        .trigger(Rebound::State("idle".to_string()))
        .build()?;

    let printer = Rc::new(RefCell::new(Printer));
    machine.set_delegate(&printer);

    println!("Press (no transition back, so the rebound is a jump):");
    machine.set_state("pressed")?;
    machine.drive(0.016)?;
    println!("  state afterwards: {}\n", machine.state());

    println!("Flash (animated rebound over 250ms):");
    machine.set_state("flash")?;
    machine.drive(0.016)?;
    machine.drive(0.1)?;

    let saved = machine.checkpoint()?.to_json()?;
    println!("  checkpoint taken mid-rebound ({} bytes of JSON)", saved.len());

    let template = machine
        .template()
        .cloned()
        .ok_or(blendstate::StateMachineError::NotInitialized)?;
    let mut restored = StateMachine::restore(template, Checkpoint::from_json(&saved)?)?;
    restored.set_delegate(&printer);

    println!("\nResumed from checkpoint:");
    while restored.drive(0.05)? {}
    println!("  state afterwards: {}", restored.state());

    println!("\nHistory:");
    for record in restored.history().transitions() {
        println!(
            "  {} -> {} ({:.2}s{})",
            record.from,
            record.to,
            record.duration,
            if record.redirected { ", redirected" } else { "" }
        );
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
