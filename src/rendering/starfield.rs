//! Background stars for the game surface.
//!
//! Stars are scattered once when a renderer is created and reused for every
//! frame, which keeps repeated renders of one snapshot identical.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::rendering::display_list::Rect;

pub const STAR_COUNT: usize = 25;
pub const STAR_SIZE: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Starfield {
    stars: Vec<Rect>,
}

impl Starfield {
    /// Scatters stars uniformly over a `width` x `height` surface.
    pub fn generate(seed: u64, width: f32, height: f32) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| {
                let x = rng.gen::<f32>() * width;
                let y = rng.gen::<f32>() * height;
                Rect::new(x, y, STAR_SIZE, STAR_SIZE)
            })
            .collect();
        Self { stars }
    }

    pub fn empty() -> Self {
        Self { stars: Vec::new() }
    }

    pub fn stars(&self) -> &[Rect] {
        &self.stars
    }
}
