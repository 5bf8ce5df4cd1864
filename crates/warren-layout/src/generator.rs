//! Random generation of area sets for a given environment.
//!
//! The generator draws area sizes, types, and tags from weighted
//! distributions until the requested share of the environment is covered,
//! then hands the unpositioned areas to the placement engine.

use indexmap::IndexMap;

use warren_core::{Area, AreaType, RandomSource, Vector};

use crate::distributor::AreaDistributor;
use crate::error::GeneratorError;

/// How many freshly generated sets to try placing before giving up.
const MAX_PLACEMENT_ATTEMPTS: usize = 3;

/// How many draws one batch gets; draws that would exceed the fill budget
/// are discarded but still consume an attempt.
const MAX_DRAW_ATTEMPTS: usize = 10;

/// Weighted distributions steering [`RandomAreaGenerator`].
///
/// All weights are relative within their own distribution; when weights do
/// not sum to one the last entry absorbs the remainder.
#[derive(Clone, Debug)]
pub struct RandomAreaGeneratorSettings {
    /// The share of the environment's cells the generated areas should
    /// cover in total.
    pub fill_factor: f64,
    /// Candidate area sizes; a coin flip may transpose the drawn size.
    pub size_distribution: Vec<(Vector, f32)>,
    /// Candidate area types.
    pub type_distribution: Vec<(AreaType, f32)>,
    /// Candidate tags per area type; types missing from the map get no
    /// tags.
    pub tag_distribution: IndexMap<AreaType, Vec<(String, f32)>>,
}

impl Default for RandomAreaGeneratorSettings {
    fn default() -> Self {
        let mut tag_distribution = IndexMap::new();
        tag_distribution.insert(
            AreaType::Fill,
            vec![
                ("ruins".to_string(), 0.2),
                ("lake".to_string(), 0.2),
                ("dirt".to_string(), 0.2),
                ("swamp".to_string(), 0.2),
                ("void".to_string(), 0.2),
            ],
        );
        tag_distribution.insert(
            AreaType::Cave,
            vec![
                ("ruins".to_string(), 0.3),
                ("den".to_string(), 0.2),
                ("cave".to_string(), 0.5),
            ],
        );
        tag_distribution.insert(
            AreaType::Hall,
            vec![("room".to_string(), 0.5), ("loot".to_string(), 0.5)],
        );
        Self {
            fill_factor: 0.33,
            size_distribution: vec![
                (Vector::new(2, 2), 0.25),
                (Vector::new(2, 3), 0.25),
                (Vector::new(3, 4), 0.15),
                (Vector::new(3, 6), 0.15),
                (Vector::new(4, 8), 0.075),
                (Vector::new(5, 6), 0.075),
                (Vector::new(7, 7), 0.005),
            ],
            type_distribution: vec![
                (AreaType::Fill, 0.2),
                (AreaType::Cave, 0.4),
                (AreaType::Hall, 0.4),
            ],
            tag_distribution,
        }
    }
}

/// Generates random sets of unpositioned areas.
pub struct RandomAreaGenerator {
    random: RandomSource,
    settings: RandomAreaGeneratorSettings,
}

impl RandomAreaGenerator {
    /// Creates a generator drawing from `random` with the given settings.
    pub fn new(random: RandomSource, settings: RandomAreaGeneratorSettings) -> Self {
        Self { random, settings }
    }

    /// Generates unpositioned areas covering up to
    /// `fill_factor × env area` cells.
    ///
    /// The batch gets 10 draws; a draw whose area would push the total
    /// past the fill budget is discarded but still consumes an attempt, so
    /// the budget is never exceeded. An environment too small to fit any
    /// candidate size with a one-cell margin yields an empty batch.
    pub fn generate(&mut self, env_size: Vector) -> Vec<Area> {
        let max_size = env_size - Vector::new(2, 2);
        if !self
            .settings
            .size_distribution
            .iter()
            .any(|(size, _)| size.x <= max_size.x && size.y <= max_size.y)
        {
            log::debug!("no candidate size fits in {max_size}, yielding no areas");
            return Vec::new();
        }
        let budget = env_size.area() as f64 * self.settings.fill_factor;
        let mut areas = Vec::new();
        let mut covered = 0i64;
        let mut attempts = MAX_DRAW_ATTEMPTS;
        while attempts > 0 && (covered as f64) < budget {
            let area = self.random_area();
            if ((covered + area.size().area()) as f64) < budget {
                covered += area.size().area();
                areas.push(area);
            }
            attempts -= 1;
        }
        areas
    }

    /// Generates areas and places them, regenerating from scratch when the
    /// placement ends up invalid.
    ///
    /// Returns the placed areas, all positioned and overlap-free, or
    /// [`GeneratorError::PlacementFailed`] after three failed attempts.
    pub fn generate_placed(
        &mut self,
        env_size: Vector,
        distributor: &mut AreaDistributor<'_>,
    ) -> Result<Vec<Area>, GeneratorError> {
        for attempt in 1..=MAX_PLACEMENT_ATTEMPTS {
            let mut areas = self.generate(env_size);
            let report = distributor.distribute(env_size, &mut areas)?;
            if report.layout_valid {
                return Ok(areas);
            }
            log::warn!("placement attempt {attempt} produced an invalid layout, regenerating");
        }
        Err(GeneratorError::PlacementFailed {
            attempts: MAX_PLACEMENT_ATTEMPTS,
        })
    }

    /// One area with a random type, size (transposed on a coin flip), and
    /// tag.
    fn random_area(&mut self) -> Area {
        let area_type = *self.random.pick_weighted(&self.settings.type_distribution);
        let mut size = *self.random.pick_weighted(&self.settings.size_distribution);
        if self.random.coin_flip() {
            size = size.transposed();
        }
        let area = Area::unpositioned(size, area_type);
        match self.settings.tag_distribution.get(&area_type) {
            Some(tags) if !tags.is_empty() => {
                area.with_tags([self.random.pick_weighted(tags).clone()])
            }
            _ => area,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(seed: u64) -> RandomAreaGenerator {
        RandomAreaGenerator::new(
            RandomSource::new(seed),
            RandomAreaGeneratorSettings::default(),
        )
    }

    #[test]
    fn fill_budget_is_never_exceeded() {
        let env_size = Vector::new(30, 30);
        let mut generator = generator(42);
        let areas = generator.generate(env_size);
        assert!(!areas.is_empty());
        let covered: i64 = areas.iter().map(|a| a.size().area()).sum();
        let budget = env_size.area() as f64 * 0.33;
        assert!(
            (covered as f64) < budget,
            "covered {covered} cells of a {budget} budget",
        );
    }

    #[test]
    fn draw_budget_caps_the_batch_size() {
        // A full fill factor in a huge environment never runs out of
        // budget, so the draw attempts are the only thing stopping the
        // batch.
        let settings = RandomAreaGeneratorSettings {
            fill_factor: 1.0,
            ..RandomAreaGeneratorSettings::default()
        };
        let mut generator = RandomAreaGenerator::new(RandomSource::new(42), settings);
        let areas = generator.generate(Vector::new(100, 100));
        assert_eq!(areas.len(), 10);
    }

    #[test]
    fn generated_areas_are_unpositioned_and_typed() {
        let mut generator = generator(42);
        let areas = generator.generate(Vector::new(30, 30));
        assert!(!areas.is_empty());
        for area in &areas {
            assert!(!area.has_position());
            assert!(matches!(
                area.area_type(),
                AreaType::Fill | AreaType::Cave | AreaType::Hall
            ));
            assert_eq!(area.tags().len(), 1);
        }
    }

    #[test]
    fn tiny_environment_yields_no_areas() {
        // 3x3 leaves 1x1 after margins; no candidate size fits.
        let mut generator = generator(7);
        assert!(generator.generate(Vector::new(3, 3)).is_empty());
    }

    #[test]
    fn same_seed_generates_the_same_set() {
        let a = generator(5).generate(Vector::new(20, 20));
        let b = generator(5).generate(Vector::new(20, 20));
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.size(), y.size());
            assert_eq!(x.area_type(), y.area_type());
            assert_eq!(x.tags(), y.tags());
        }
    }

    #[test]
    fn generate_placed_returns_a_valid_layout() {
        let mut generator = generator(13);
        let mut distributor = AreaDistributor::builder()
            .random(RandomSource::new(13))
            .build();
        let env_size = Vector::new(40, 40);
        let areas = generator
            .generate_placed(env_size, &mut distributor)
            .unwrap();
        assert!(!areas.is_empty());
        for (i, area) in areas.iter().enumerate() {
            assert!(area.fits_into(Vector::ZERO, env_size));
            for other in &areas[i + 1..] {
                assert!(!area.overlaps(other));
            }
        }
    }
}
