//! Turret avatar demo: builds a small part hierarchy, animates it for a few
//! frames, and records the resulting block draws

use avatar_core::foundation::logging;
use avatar_core::foundation::math::utils::lerp;
use avatar_core::prelude::*;

const FRAMES: u32 = 4;
const TURRET_SWEEP_DEGREES: f64 = 90.0;
const BARREL_PITCH_DEGREES: f64 = -20.0;

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Draw(#[from] DrawError),

    #[error("Part tree rejected {0}")]
    Build(&'static str),
}

struct TurretAvatar {
    tree: PartTree,
    base: PartKey,
    barrel: PartKey,
}

impl TurretAvatar {
    fn new(config: &RenderConfig, host: &CommandRecorder) -> Result<Self, DemoError> {
        let mut tree = PartTree::new("root", config.clone());
        let base = tree
            .add_part(tree.root(), "base")
            .ok_or(DemoError::Build("base"))?;
        let barrel = tree.add_part(base, "barrel").ok_or(DemoError::Build("barrel"))?;

        if let Some(part) = tree.get_mut(barrel) {
            part.customization.set_pivot(&Vec3::new(0.0, 0.5, 0.0));
            part.set_transform(
                &Vec3::new(0.0, 0.5, -1.2),
                &Vec3::zeros(),
                &Vec3::new(0.25, 0.25, 1.0),
            );
        }

        let mut plate = BlockTask::new();
        plate.set_block("minecraft:smooth_stone_slab[type=bottom]".parse()?, host);
        tree.add_task(base, plate.into()).ok_or(DemoError::Build("plate"))?;

        let mut tube = BlockTask::new();
        tube.set_block("minecraft:iron_block".parse()?, host);
        tree.add_task(barrel, tube.into()).ok_or(DemoError::Build("tube"))?;

        let mut muzzle = BlockTask::new();
        muzzle.set_block("minecraft:lantern[hanging=false]".parse()?, host);
        let mut muzzle = RenderTask::from(muzzle);
        muzzle.transform_mut().emissive = true;
        muzzle.transform_mut().pos.set_xyz(0.0, 0.0, -1.0);
        tree.add_task(barrel, muzzle).ok_or(DemoError::Build("muzzle"))?;

        Ok(Self { tree, base, barrel })
    }

    fn animate(&mut self, t: f64) {
        if let Some(base) = self.tree.get_mut(self.base) {
            base.set_transform(
                &Vec3::zeros(),
                &Vec3::new(0.0, lerp(0.0, TURRET_SWEEP_DEGREES, t), 0.0),
                &Vec3::new(1.0, 1.0, 1.0),
            );
        }
        if let Some(barrel) = self.tree.get_mut(self.barrel) {
            let rot = Vec3::new(lerp(0.0, BARREL_PITCH_DEGREES, t), 0.0, 0.0);
            barrel.customization.set_rot(&rot);
            barrel.customization.recalculate();
        }
    }
}

fn load_config() -> Result<RuntimeConfig, DemoError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(RuntimeConfig::load_from_file(&path)?),
        None => {
            log::info!("No config file given, using defaults");
            Ok(RuntimeConfig::default())
        }
    }
}

fn run() -> Result<(), DemoError> {
    let config = load_config()?;
    config.pools.apply();

    let mut host = CommandRecorder::new().with_quad_count("minecraft:lantern", 20);
    let mut avatar = TurretAvatar::new(&config.render, &host)?;
    let mut stack = PartStack::new(config.pools.stack_capacity);

    for frame in 0..FRAMES {
        let t = f64::from(frame) / f64::from(FRAMES - 1);
        avatar.animate(t);

        let stats = avatar
            .tree
            .render(avatar.tree.root(), &mut stack, &mut host, 0x00A0_00A0, 0)?;
        let batch = host.take_batch();
        log::info!(
            "Frame {}: {} parts, {} draws, {} quads",
            frame,
            stats.parts_visited,
            batch.len(),
            stats.complexity
        );
        for command in &batch.commands {
            let [x, y, z] = command.translation();
            log::debug!("  {} at ({:.3}, {:.3}, {:.3})", command.block, x, y, z);
        }
    }

    let vectors = Vec3::with_pool(|pool| pool.stats());
    let matrices = Mat4::with_pool(|pool| pool.stats());
    log::info!(
        "Pools: vec3 created {} reused {}, mat4 created {} reused {}",
        vectors.created,
        vectors.reused,
        matrices.created,
        matrices.reused
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level(log::LevelFilter::Info);

    log::info!("Starting avatar demo");

    match run() {
        Ok(()) => {
            log::info!("Avatar demo completed successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Avatar demo failed: {:?}", e);
            Err(e.into())
        }
    }
}
