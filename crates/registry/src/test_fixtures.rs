use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

use crate::node::CapabilityNode;
use crate::predicate::{VariantDeclaration, VariantPredicate};
use crate::profile::{FamilyId, ProfileDescriptor, Version};
use crate::registry::Registry;

pub const A: FamilyId = FamilyId::new(1);
pub const B: FamilyId = FamilyId::new(2);
pub const C: FamilyId = FamilyId::new(3);

pub fn v(major: u32) -> Version {
	Version::major(major)
}

pub fn profile(family: FamilyId, major: u32) -> ProfileDescriptor {
	ProfileDescriptor::new(family, v(major))
}

/// Unavailable for A below 60, "X" for A from 60, "Y" for every B.
pub fn widget() -> CapabilityNode {
	CapabilityNode::new("Widget")
		.variant(VariantDeclaration::unavailable(VariantPredicate::family(A).until(v(60))))
		.variant(VariantDeclaration::available(VariantPredicate::family(A).since(v(60))).with_value("X"))
		.variant(VariantDeclaration::available(VariantPredicate::family(B)).with_value("Y"))
}

/// Available for A only; its child is declared available everywhere.
pub fn form() -> CapabilityNode {
	CapabilityNode::new("Form")
		.variant(VariantDeclaration::available(VariantPredicate::family(A)))
		.child(
			CapabilityNode::new("Form.Submit")
				.variant(VariantDeclaration::available(VariantPredicate::any()).with_value("submit")),
		)
}

pub fn everywhere(key: &'static str) -> CapabilityNode {
	CapabilityNode::new(key).variant(VariantDeclaration::available(VariantPredicate::any()))
}

pub fn frozen(roots: impl IntoIterator<Item = CapabilityNode>) -> Registry {
	let registry = Registry::new("test");
	for root in roots {
		registry.register_root(root).expect("fixture root should register");
	}
	registry.freeze().expect("fixture registry should freeze");
	registry
}

/// Counts `WARN` events emitted on the current thread.
#[derive(Clone, Default)]
struct WarnCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for WarnCounter {
	fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
		if *event.metadata().level() == Level::WARN {
			self.0.fetch_add(1, Ordering::Relaxed);
		}
	}
}

/// Runs `f` under a thread-local subscriber and returns its result with the warning count.
pub fn count_warnings<R>(f: impl FnOnce() -> R) -> (R, usize) {
	let counter = WarnCounter::default();
	let subscriber = tracing_subscriber::registry().with(counter.clone());
	let out = tracing::subscriber::with_default(subscriber, f);
	(out, counter.0.load(Ordering::Relaxed))
}
