//! Version 1 schema: five extrusion profiles, six footprint families with
//! grid shell mode, and separate height, twist and skew methods.

use super::builder::SchemaBuilder;
use super::selectors::{
    Category, ExtrusionCategory, FootprintCategory, MethodCategory, Selectors, SKEW_METHOD_PATH,
    TWIST_METHOD_PATH,
};
use crate::error::CodecResult;

pub(crate) const VERSION: u32 = 1;

/// Bounds and defaults of one angle method branch.
struct AngleBounds {
    branch: &'static str,
    limit: f64,
    step: f64,
    swing: f64,
}

const TWIST: AngleBounds = AngleBounds {
    branch: "twist",
    limit: 45.0,
    step: 5.0,
    swing: 10.0,
};

const SKEW: AngleBounds = AngleBounds {
    branch: "skew",
    limit: 30.0,
    step: 2.0,
    swing: 5.0,
};

pub(crate) fn top_level(builder: &mut SchemaBuilder, selectors: &Selectors) -> CodecResult<()> {
    builder
        .version(VERSION)?
        .selector(ExtrusionCategory::PATH, selectors.extrusion, VERSION)?
        .selector(FootprintCategory::PATH, selectors.footprint, VERSION)?
        .selector(MethodCategory::PATH, selectors.heights, VERSION)?
        .selector(TWIST_METHOD_PATH, selectors.twist, VERSION)?
        .selector(SKEW_METHOD_PATH, selectors.skew, VERSION)?;
    Ok(())
}

pub(crate) fn full(builder: &mut SchemaBuilder, selectors: &Selectors) -> CodecResult<()> {
    top_level(builder, selectors)?;
    extrusion(builder, selectors.extrusion)?;
    footprint(builder, selectors.footprint)?;
    heights(builder, selectors.heights)?;
    angle_method(builder, &TWIST, selectors.twist)?;
    angle_method(builder, &SKEW, selectors.skew)?;
    Ok(())
}

fn extrusion(builder: &mut SchemaBuilder, category: ExtrusionCategory) -> CodecResult<()> {
    builder
        .float("extrusion.insetTop", 0.0, 0.5, 2, 0.1)?
        .float("extrusion.insetBottom", 0.0, 0.5, 2, 0.1)?
        .float("extrusion.insetSides", 0.0, 0.5, 2, 0.1)?
        .int("extrusion.resolution", 2, 32, 8)?;

    if category != ExtrusionCategory::Square {
        builder.float("extrusion.radiusTop", 0.0, 1.0, 2, 0.5)?;
    }
    match category {
        ExtrusionCategory::Gothic => {
            builder.float("extrusion.pointedness", 0.0, 1.0, 2, 0.5)?;
        }
        ExtrusionCategory::Nested => {
            builder
                .int("extrusion.divisionCount", 1, 8, 3)?
                .int("extrusion.divisionResolution", 1, 16, 4)?
                .float("extrusion.divisionPointedness", 0.0, 1.0, 2, 1.0)?;
        }
        _ => {}
    }
    Ok(())
}

fn footprint(builder: &mut SchemaBuilder, category: FootprintCategory) -> CodecResult<()> {
    match category {
        FootprintCategory::Square => {
            builder.float("footprint.size", 10.0, 200.0, 0, 60.0)?;
        }
        FootprintCategory::SquareGrid | FootprintCategory::TriangleGrid | FootprintCategory::HexGrid => {
            builder
                .float("footprint.size", 5.0, 100.0, 0, 20.0)?
                .int("footprint.xCount", 1, 12, 3)?
                .int("footprint.yCount", 1, 12, 3)?
                .boolean("footprint.shell", false)?
                .int("footprint.shellThickness", 1, 4, 1)?;
        }
        FootprintCategory::Cylinder => {
            builder
                .int("footprint.segments", 3, 32, 12)?
                .int("footprint.rings", 1, 4, 1)?
                .float("footprint.innerRadius", 0.0, 100.0, 0, 30.0)?
                .float("footprint.ringWidth", 5.0, 50.0, 1, 15.0)?
                .float("footprint.ringGrowth", 0.5, 2.0, 2, 1.0)?
                .float("footprint.rotation", 0.0, 360.0, 0, 0.0)?;
        }
        FootprintCategory::MalculmiusOne => {
            builder
                .int("footprint.lobeCount", 3, 12, 6)?
                .float("footprint.circleRadius", 0.0, 100.0, 0, 25.0)?
                .float("footprint.lobeRadius", 5.0, 80.0, 0, 20.0)?
                .int("footprint.lobeDivisions", 1, 8, 3)?
                .float("footprint.offset", 0.0, 50.0, 1, 8.0)?
                .float("footprint.angleSplit", 0.1, 0.9, 2, 0.5)?;
        }
    }
    Ok(())
}

fn heights(builder: &mut SchemaBuilder, method: MethodCategory) -> CodecResult<()> {
    builder
        .int("heights.storyCount", 1, 32, 4)?
        .boolean("heights.relative", false)?
        .float("heights.height", 5.0, 500.0, 0, 40.0)?;

    match method {
        MethodCategory::None => {}
        MethodCategory::Incremental => {
            builder
                .float("heights.angle", -1.0, 1.0, 2, 0.1)?
                .float("heights.total", 0.0, 2.0, 2, 1.0)?;
        }
        MethodCategory::Sin => {
            builder
                .float("heights.min", 0.0, 2.0, 2, 0.5)?
                .float("heights.max", 0.0, 2.0, 2, 1.5)?
                .float("heights.period", 0.0, 10.0, 2, 1.0)?
                .float("heights.phaseShift", 0.0, 360.0, 0, 0.0)?;
        }
    }
    Ok(())
}

fn angle_method(builder: &mut SchemaBuilder, bounds: &AngleBounds, method: MethodCategory) -> CodecResult<()> {
    let path = |leaf: &str| format!("{}.{leaf}", bounds.branch);
    let limit = bounds.limit;

    match method {
        MethodCategory::None => {}
        MethodCategory::Incremental => {
            builder
                .float(&path("angle"), -limit, limit, 1, bounds.step)?
                .float(&path("total"), 0.0, 2.0, 2, 1.0)?;
        }
        MethodCategory::Sin => {
            builder
                .float(&path("min"), -limit, limit, 1, -bounds.swing)?
                .float(&path("max"), -limit, limit, 1, bounds.swing)?
                .float(&path("period"), 0.0, 10.0, 2, 1.0)?
                .float(&path("phaseShift"), 0.0, 360.0, 0, 0.0)?;
        }
    }
    Ok(())
}
