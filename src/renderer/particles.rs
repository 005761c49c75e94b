//! Particle rendering

use super::shapes::fill_disc;
use crate::color::Pixel;
use crate::framebuffer::FrameBuffer;
use crate::settings::ParticleSettings;
use crate::sim::particles::ParticleSystem;

/// Clear to black and draw every particle as a fading disc
///
/// Radius and alpha both shrink linearly with remaining lifetime.
pub fn render_particles(frame: &mut FrameBuffer, system: &ParticleSystem, settings: &ParticleSettings) {
    frame.clear(Pixel::BLACK);
    for p in system.particles() {
        let life = p.life_fraction();
        fill_disc(frame, p.pos, life * settings.size, p.colour, life);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Palette;
    use crate::rng::FixedSequence;
    use glam::Vec2;

    #[test]
    fn test_fades_with_lifetime() {
        let settings = ParticleSettings {
            lifetime: 10.0,
            size: 3.0,
            ..Default::default()
        };
        let mut system = ParticleSystem::new();
        let mut rng = FixedSequence::constant(0.5);
        system.spawn(Vec2::new(32.5, 32.5), &settings, &Palette::default(), 0.0, &mut rng);
        // midpoint samples give zero velocity; drop gravity so it stays put
        let settings = ParticleSettings {
            gravity: 0.0,
            ..settings
        };

        let mut frame = FrameBuffer::new();
        render_particles(&mut frame, &system, &settings);
        let fresh = frame.get(32, 32).unwrap_or_default();
        let fresh_lit = frame.pixels().iter().filter(|p| **p != Pixel::BLACK).count();

        for _ in 0..50 {
            system.advance(&settings);
        }
        render_particles(&mut frame, &system, &settings);
        let faded = frame.get(32, 32).unwrap_or_default();
        let faded_lit = frame.pixels().iter().filter(|p| **p != Pixel::BLACK).count();

        assert_eq!(fresh, Pixel::new(180, 180, 255));
        assert!(faded.b < fresh.b);
        assert!(faded_lit < fresh_lit);
    }

    #[test]
    fn test_fades_monotonically_until_expiry() {
        let settings = ParticleSettings {
            gravity: 0.0,
            lifetime: 10.0,
            size: 3.0,
            ..Default::default()
        };
        let mut system = ParticleSystem::new();
        let mut rng = FixedSequence::constant(0.5);
        system.spawn(Vec2::new(32.5, 32.5), &settings, &Palette::default(), 0.0, &mut rng);

        let mut frame = FrameBuffer::new();
        let mut last_lit = usize::MAX;
        let mut last_blue = u8::MAX;
        while !system.is_empty() {
            render_particles(&mut frame, &system, &settings);
            let lit = frame.pixels().iter().filter(|p| **p != Pixel::BLACK).count();
            let blue = frame.get(32, 32).map_or(0, |p| p.b);
            assert!(lit <= last_lit);
            assert!(blue <= last_blue);
            last_lit = lit;
            last_blue = blue;
            system.advance(&settings);
        }
        // last live tick had lifetime 1: a faint single pixel at most
        assert!(last_lit <= 1);
        render_particles(&mut frame, &system, &settings);
        assert_eq!(frame, FrameBuffer::new());
    }

    #[test]
    fn test_nearly_expired_particle_stays_in_place() {
        // one tick removes all but ~0.1 of the lifetime
        let settings = ParticleSettings {
            gravity: 0.0,
            lifetime: 10.0 / 99.9,
            size: 4.0,
            ..Default::default()
        };
        let mut system = ParticleSystem::new();
        let mut rng = FixedSequence::constant(0.5);
        system.spawn(Vec2::new(10.5, 20.5), &settings, &Palette::default(), 0.0, &mut rng);
        system.advance(&settings);
        assert_eq!(system.len(), 1);
        let life = system.particles()[0].life_fraction();
        assert!(life > 0.0 && life < 0.01);

        let mut frame = FrameBuffer::new();
        frame.clear(Pixel::WHITE);
        render_particles(&mut frame, &system, &settings);
        // only the home pixel is touched, and barely
        let touched: Vec<_> = frame
            .pixels()
            .iter()
            .enumerate()
            .filter(|(_, p)| **p != Pixel::BLACK)
            .collect();
        assert!(touched.len() <= 1);
        for (i, p) in touched {
            assert_eq!(i, 20 * FrameBuffer::WIDTH + 10);
            assert!(p.b <= 2);
        }
    }

    #[test]
    fn test_empty_system_is_black() {
        let mut frame = FrameBuffer::new();
        frame.clear(Pixel::WHITE);
        render_particles(&mut frame, &ParticleSystem::new(), &ParticleSettings::default());
        assert_eq!(frame, FrameBuffer::new());
    }
}
