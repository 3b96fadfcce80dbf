//! Next-piece batches.
//!
//! The canonical policy builds every unique rotation of the catalog,
//! keeps the ones that still fit somewhere on the grid and deals from that
//! pool bag-style: no variant repeats until every placeable variant has
//! been dealt once. A batch can only be fully unplaceable when no variant
//! fits anywhere, which is what ends the game.

use blast_core::{Grid, Matrix, ShapeId, ShapeInstance, ShapeTemplate, CATALOG};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::placement::can_place;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Deal only variants that fit the current grid when any do.
    #[default]
    Placeable,
    /// Uniform templates with 0-3 blind rotations; grid ignored.
    Blind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variant {
    pub template: &'static ShapeTemplate,
    pub matrix: Matrix,
}

/// Every unique rotation of every non-vertical template.
#[derive(Clone, Debug)]
pub struct VariantPool {
    variants: Vec<Variant>,
}

impl VariantPool {
    /// Templates whose rows don't form a valid matrix are skipped.
    pub fn from_templates(templates: &'static [ShapeTemplate]) -> Self {
        let variants = templates
            .iter()
            .filter(|t| !t.pure_vertical)
            .filter_map(|t| t.matrix().ok().map(|m| (t, m)))
            .flat_map(|(template, matrix)| {
                matrix
                    .unique_rotations()
                    .into_iter()
                    .map(move |matrix| Variant { template, matrix })
            })
            .collect();
        Self { variants }
    }

    pub fn catalog() -> Self {
        Self::from_templates(&CATALOG)
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn placeable(&self, grid: &Grid) -> Vec<&Variant> {
        self.variants
            .iter()
            .filter(|v| can_place(&v.matrix, grid))
            .collect()
    }
}

pub struct BatchGenerator<R> {
    rng: R,
    pool: VariantPool,
    templates: &'static [ShapeTemplate],
    policy: BatchPolicy,
    next_id: u64,
}

impl<R: Rng> BatchGenerator<R> {
    pub fn new(rng: R, policy: BatchPolicy) -> Self {
        Self::with_templates(rng, policy, &CATALOG)
    }

    pub fn with_templates(rng: R, policy: BatchPolicy, templates: &'static [ShapeTemplate]) -> Self {
        Self {
            rng,
            pool: VariantPool::from_templates(templates),
            templates,
            policy,
            next_id: 0,
        }
    }

    pub fn policy(&self) -> BatchPolicy {
        self.policy
    }

    pub fn pool(&self) -> &VariantPool {
        &self.pool
    }

    /// Shared with the session for cosmetic picks (feedback text).
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn generate(&mut self, grid: &Grid, batch_size: usize) -> Vec<ShapeInstance> {
        match self.policy {
            BatchPolicy::Placeable => self.generate_placeable(grid, batch_size),
            BatchPolicy::Blind => self.generate_blind(batch_size),
        }
    }

    fn generate_placeable(&mut self, grid: &Grid, batch_size: usize) -> Vec<ShapeInstance> {
        if self.pool.is_empty() {
            return self.generate_blind(batch_size);
        }

        let placeable = self.pool.placeable(grid);
        let base: Vec<&Variant> = if placeable.is_empty() {
            self.pool.variants.iter().collect()
        } else {
            placeable
        };

        let mut batch = Vec::with_capacity(batch_size);
        let mut working: Vec<&Variant> = Vec::new();
        while batch.len() < batch_size {
            if working.is_empty() {
                working = base.clone();
            }
            let variant = working.swap_remove(self.rng.gen_range(0..working.len()));
            self.next_id += 1;
            batch.push(ShapeInstance::new(
                ShapeId(self.next_id),
                variant.template,
                variant.matrix.clone(),
            ));
        }
        batch
    }

    fn generate_blind(&mut self, batch_size: usize) -> Vec<ShapeInstance> {
        let templates = self.templates;
        let usable: Vec<(&'static ShapeTemplate, Matrix)> = templates
            .iter()
            .filter_map(|t| t.matrix().ok().map(|m| (t, m)))
            .collect();
        let mut batch = Vec::with_capacity(batch_size);
        if usable.is_empty() {
            return batch;
        }

        while batch.len() < batch_size {
            let (template, base) = &usable[self.rng.gen_range(0..usable.len())];
            let mut matrix = base.clone();
            for _ in 0..self.rng.gen_range(0..4) {
                matrix = matrix.rotate();
            }
            self.next_id += 1;
            batch.push(ShapeInstance::new(ShapeId(self.next_id), *template, matrix));
        }
        batch
    }
}
