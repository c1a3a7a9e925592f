#![forbid(unsafe_code)]

//! Herald demo: a newsroom desk broadcasting headlines to anchors.
//!
//! Walks the full observer lifecycle: registration (including a duplicate),
//! broadcast in registration order, explicit de-registration, and silent
//! expiry when an anchor is dropped without de-registering.

mod cli;

use std::rc::Rc;

use herald::{Observers, Subject};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// The notification capability an anchor must expose to be registrable.
trait NewsListener {
    fn on_headline(&self, headline: &str);
}

/// The subject: owns the observer collection and triggers broadcasts.
struct NewsDesk {
    listeners: Observers<dyn NewsListener>,
}

impl NewsDesk {
    fn new() -> Self {
        Self {
            listeners: Observers::new(),
        }
    }

    fn publish(&self, headline: &str) {
        info!(headline, "desk publishes");
        self.notify_observers(|l| l.on_headline(headline));
    }
}

impl Subject for NewsDesk {
    type Observer = dyn NewsListener;

    fn observers(&self) -> &Observers<dyn NewsListener> {
        &self.listeners
    }
}

struct Anchor {
    name: &'static str,
}

impl NewsListener for Anchor {
    fn on_headline(&self, headline: &str) {
        info!(anchor = self.name, headline, "anchor reads");
    }
}

const HEADLINES: &[&str] = &[
    "ferris spotted near the harbor",
    "borrow checker approves local merger",
    "weak references hold steady",
    "registry prunes quietly overnight",
    "broadcast reaches all live listeners",
];

fn main() {
    let opts = cli::Opts::parse();

    let default_filter = if opts.verbose { "trace" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let desk = NewsDesk::new();
    let mut cycle = HEADLINES.iter().cycle();
    let mut round = |desk: &NewsDesk| {
        for _ in 0..opts.headlines.max(1) {
            desk.publish(cycle.next().copied().unwrap_or(HEADLINES[0]));
        }
    };

    let alice: Rc<dyn NewsListener> = Rc::new(Anchor { name: "alice" });
    let bob: Rc<dyn NewsListener> = Rc::new(Anchor { name: "bob" });
    let carol: Rc<dyn NewsListener> = Rc::new(Anchor { name: "carol" });

    desk.add_observer(&alice);
    desk.add_observer(&bob);
    desk.add_observer(&carol);
    // Alice subscribed twice: she reads every headline two times.
    desk.add_observer(&alice);

    info!(live = desk.observers().live_count(), "round 1: everyone registered");
    round(&desk);

    desk.remove_observer(&bob);
    info!(live = desk.observers().live_count(), "round 2: bob de-registered");
    round(&desk);

    drop(carol);
    info!(
        handles = desk.observers().len(),
        live = desk.observers().live_count(),
        "round 3: carol dropped without de-registering"
    );
    round(&desk);

    let pruned = desk.observers().prune();
    info!(
        pruned,
        handles = desk.observers().len(),
        "expired handles pruned"
    );
}
