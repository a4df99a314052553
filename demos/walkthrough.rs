//! Walkthrough
//!
//! Runs the same kind of machine with both resolution strategies.
//!
//! Key concepts:
//! - Table strategy with an explicit exit state
//! - Embedded successors with a placeholder absorbing impossible failures
//! - Driver logging through `tracing`
//!
//! Run with: RUST_LOG=debug cargo run --example walkthrough

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use switchyard::{transitions, Definition, Embedded, Machine, Outcome, RegistryBuilder};
use tracing_subscriber::EnvFilter;

/// Returns `Repeat` (or `Ok`) until every `n`th call, which fails.
fn fails_every(n: usize, otherwise: Outcome) -> impl Fn() -> Outcome + Send + Sync {
    let calls = AtomicUsize::new(0);
    move || {
        let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call % n == 0 {
            Outcome::Fail
        } else {
            otherwise
        }
    }
}

fn table_machine() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Table strategy ===\n");

    let registry = RegistryBuilder::new()
        .state("entry", || Outcome::Ok)?
        .state("foo", || Outcome::Ok)?
        .state("bar", fails_every(3, Outcome::Repeat))?
        .terminal("end", || Outcome::Ok)?
        .build()?;

    let table = transitions! {
        entry => { Ok => foo, Fail => end, Repeat => entry },
        foo => { Ok => bar, Fail => end, Repeat => foo },
        bar => { Ok => end, Fail => end, Repeat => foo },
    }
    .build(&registry)?;

    let definition = Arc::new(Definition::new(registry, table)?);
    let mut machine = Machine::new(definition, "entry")?;
    let summary = machine.run_until_terminal()?;

    let registry = machine.definition().registry();
    let path: Vec<_> = summary.visited.iter().map(|id| registry.name(*id)).collect();
    println!("Visited: {}", path.join(" -> "));
    println!("Steps: {}\n", summary.steps);
    Ok(())
}

fn embedded_machine() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Embedded strategy ===\n");

    let registry = RegistryBuilder::new()
        .state("entry", || Outcome::Ok)?
        .state("foo", fails_every(5, Outcome::Ok))?
        .state("bar", fails_every(5, Outcome::Repeat))?
        .state("fail", || Outcome::Repeat)?
        .placeholder("null")?
        .link("entry", "foo", "null")
        .link("foo", "entry", "bar")
        .link("bar", "entry", "fail")
        .link("fail", "entry", "null")
        .build()?;

    let definition = Arc::new(Definition::new(registry, Embedded)?);
    let mut machine = Machine::new(definition, "entry")?;

    for _ in 0..20 {
        machine.step()?;
        println!("  now in {}", machine.current_name());
    }
    println!("Placeholder hits: {}", machine.placeholder_hits());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    table_machine()?;
    embedded_machine()?;

    println!("\n=== Walkthrough Complete ===");
    Ok(())
}
