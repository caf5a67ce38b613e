//! Particle populations and the per-frame animation rules built on them.

mod ambient;
mod cloud;
mod firework;
mod tree;

pub use ambient::LeafDrift;
pub use cloud::Cloud;
pub use firework::{Firework, FireworkPhase, Spark};
pub use tree::{LeafState, Tree, TreeLeaf};

use glam::Vec3;

use crate::render::{Color, Geometry};

/// Fixed-order particle samples with index-aligned colors and per-particle attributes
#[derive(Debug, Clone)]
pub struct ParticlePopulation<A> {
    positions: Vec<Vec3>,
    colors: Vec<Color>,
    attributes: Vec<A>,
}

impl<A> ParticlePopulation<A> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
            attributes: Vec::with_capacity(capacity),
        }
    }

    /// Append a particle; its color starts white
    pub fn push(&mut self, position: Vec3, attribute: A) {
        self.positions.push(position);
        self.colors.push(Color::WHITE);
        self.attributes.push(attribute);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut [Color] {
        &mut self.colors
    }

    pub fn attributes(&self) -> &[A] {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut [A] {
        &mut self.attributes
    }

    /// Positions paired with their attributes
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&mut Vec3, &mut A)> {
        self.positions.iter_mut().zip(self.attributes.iter_mut())
    }

    /// Mean position (zero for an empty population)
    pub fn centroid(&self) -> Vec3 {
        if self.positions.is_empty() {
            return Vec3::ZERO;
        }
        self.positions.iter().copied().sum::<Vec3>() / self.positions.len() as f32
    }

    pub fn geometry(&self) -> Geometry<'_> {
        Geometry::points(&self.positions, &self.colors)
    }
}

impl<A> FromIterator<(Vec3, A)> for ParticlePopulation<A> {
    fn from_iter<I: IntoIterator<Item = (Vec3, A)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut population = Self::with_capacity(iter.size_hint().0);
        for (position, attribute) in iter {
            population.push(position, attribute);
        }
        population
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_arrays_aligned() {
        let mut population = ParticlePopulation::with_capacity(2);
        population.push(Vec3::X, 1.0f32);
        population.push(Vec3::Y, 2.0f32);

        assert_eq!(population.len(), 2);
        assert_eq!(population.colors().len(), 2);
        assert_eq!(population.attributes(), &[1.0, 2.0]);
    }

    #[test]
    fn test_iter_mut_pairs_by_index() {
        let mut population: ParticlePopulation<f32> =
            (0..4).map(|i| (Vec3::splat(i as f32), i as f32)).collect();

        for (position, speed) in population.iter_mut() {
            position.y -= *speed;
        }
        assert!(population.positions().iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn test_centroid() {
        let population: ParticlePopulation<()> = [Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0)]
            .into_iter()
            .map(|p| (p, ()))
            .collect();
        assert_eq!(population.centroid(), Vec3::new(1.0, 2.0, 3.0));

        let empty: ParticlePopulation<()> = ParticlePopulation::with_capacity(0);
        assert_eq!(empty.centroid(), Vec3::ZERO);
    }
}
