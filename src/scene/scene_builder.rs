//! SceneBuilder - registry construction from the catalog
//!
//! Walks the catalog's descriptor tree, creating runtime bodies with their
//! parent links, resolving trail tickets and seeding the belts.

use rand::rngs::StdRng;
use rand::SeedableRng;

use orrery_core::{
    BeltSystem, BodyKey, BodyRegistry, Catalog, CatalogError, CelestialBody, TrailTicket,
};

/// Builder for constructing the body registry from a catalog
pub struct SceneBuilder {
    registry: BodyRegistry,
    tickets: Vec<TrailTicket>,
}

impl SceneBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            registry: BodyRegistry::new(),
            tickets: Vec::new(),
        }
    }

    /// Load a catalog file and add every body in it
    pub fn with_catalog_file(self, path: &str) -> Result<Self, CatalogError> {
        let catalog = Catalog::load(path)?;
        Ok(self.with_catalog(&catalog))
    }

    /// Add every body from a parsed catalog
    pub fn with_catalog(mut self, catalog: &Catalog) -> Self {
        for descriptor in &catalog.bodies {
            self.add_subtree(descriptor, None);
        }
        self
    }

    /// Seed the asteroid and Kuiper belts
    pub fn with_belts(mut self, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        self.registry.set_belts(BeltSystem::generate(&mut rng));
        self
    }

    fn add_subtree(
        &mut self,
        descriptor: &orrery_core::BodyDescriptor,
        parent: Option<BodyKey>,
    ) {
        let key = self
            .registry
            .add_body(CelestialBody::from_descriptor(descriptor, parent));

        if descriptor.trail {
            // Tickets resolve after the whole tree is built
            self.tickets.extend(self.registry.request_trail(key));
        }

        for satellite in &descriptor.satellites {
            self.add_subtree(satellite, Some(key));
        }
    }

    /// Resolve trail tickets and return the finished registry
    pub fn build(mut self) -> BodyRegistry {
        log::info!(
            "Scene built: {} bodies, {} trails",
            self.registry.len(),
            self.tickets.len()
        );
        for ticket in self.tickets {
            self.registry.attach_trail(ticket);
        }
        self.registry
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}
