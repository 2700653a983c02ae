//! Fading Button
//!
//! This example drives a button's opacity and tint between two states from a
//! simulated 60 fps frame loop.
//!
//! Key concepts:
//! - States as attribute sets (scalar and color channels)
//! - Eased transitions resolved by curve name
//! - Redirecting a transition mid-flight without a visual jump
//! - A host element wired up through `BoundElement`
//!
//! Run with: cargo run --example fade_button

use blendstate::core::{AttributeValue, Basis};
use blendstate::host::{BoundElement, Element, MachineDefinition};

const FRAME: f64 = 1.0 / 60.0;

#[derive(Debug, Default)]
struct Button {
    opacity: f64,
    tint: [f64; 4],
}

impl Element for Button {
    fn set_attribute(&mut self, name: &str, value: &AttributeValue) -> bool {
        match name {
            "opacity" => {
                self.opacity = value.scalar().unwrap_or(self.opacity);
                true
            }
            "tint" => {
                for (i, channel) in self.tint.iter_mut().enumerate() {
                    if let Some(sum) = value.channel(Basis(i as u16)) {
                        *channel = sum;
                    }
                }
                true
            }
            _ => false,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Fading Button ===\n");

    let definition = MachineDefinition::from_json(
        r##"{
            "initial": "standby",
            "states": {
                "standby": { "opacity": "50%", "tint": "#808080" },
                "present": { "opacity": 1.0, "tint": "#ffcc00" }
            },
            "transitions": [
                { "from": "standby", "to": "present", "duration": "200ms", "interpolation": "quadratic-ease-out" },
                { "from": "present", "to": "standby", "duration": "300ms", "interpolation": "cubic-ease-in-out" }
            ]
        }"##,
    )?;

    let button = BoundElement::from_definition(&definition, Button::default())?;
    button.update(0.0)?;
    println!("Initial state: {}", button.state()?);

    println!("\nHover: standby -> present");
    button.set_state("present")?;
    for frame in 1..=6 {
        button.update(FRAME)?;
        button.with_element(|b| {
            println!("  frame {frame}: opacity {:.3}, tint {:.2?}", b.opacity, b.tint)
        })?;
    }

    println!("\nPointer leaves halfway: redirect to standby");
    button.set_state("standby")?;
    let mut frame = 0;
    while button.update(FRAME)? {
        frame += 1;
        if frame % 4 == 0 {
            button.with_element(|b| println!("  frame {frame}: opacity {:.3}", b.opacity))?;
        }
    }
    button.with_element(|b| println!("  settled: opacity {:.3}, tint {:.2?}", b.opacity, b.tint))?;

    let path = button
        .machine()
        .inspect(|m| m.history().get_path().join(" -> "))?;
    println!("\nSettle path: {path}");

    println!("\n=== Example Complete ===");
    Ok(())
}
