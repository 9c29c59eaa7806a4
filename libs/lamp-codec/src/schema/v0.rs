//! Version 0 schema: three profiles, three footprints, one height method.
//! No twist, skew, grid shell or relative heights.

use super::builder::SchemaBuilder;
use super::selectors::{
    Category, ExtrusionCategory, FootprintCategory, MethodCategory, Selectors, SKEW_METHOD_PATH,
    TWIST_METHOD_PATH,
};
use crate::error::{CodecError, CodecResult};

pub(crate) const VERSION: u32 = 0;

pub(crate) fn top_level(builder: &mut SchemaBuilder, selectors: &Selectors) -> CodecResult<()> {
    reject_angle_method(TWIST_METHOD_PATH, selectors.twist)?;
    reject_angle_method(SKEW_METHOD_PATH, selectors.skew)?;

    builder
        .version(VERSION)?
        .selector(ExtrusionCategory::PATH, selectors.extrusion, VERSION)?
        .selector(FootprintCategory::PATH, selectors.footprint, VERSION)?
        .selector(MethodCategory::PATH, selectors.heights, VERSION)?;
    Ok(())
}

pub(crate) fn full(builder: &mut SchemaBuilder, selectors: &Selectors) -> CodecResult<()> {
    top_level(builder, selectors)?;

    builder
        .float("extrusion.insetTop", 0.0, 0.5, 2, 0.1)?
        .float("extrusion.insetBottom", 0.0, 0.5, 2, 0.1)?
        .float("extrusion.insetSides", 0.0, 0.5, 2, 0.1)?;
    if selectors.extrusion != ExtrusionCategory::Square {
        builder.float("extrusion.radiusTop", 0.0, 1.0, 2, 0.5)?;
    }

    match selectors.footprint {
        FootprintCategory::Square => {
            builder.float("footprint.size", 10.0, 200.0, 0, 60.0)?;
        }
        FootprintCategory::SquareGrid => {
            builder
                .float("footprint.size", 5.0, 100.0, 0, 20.0)?
                .int("footprint.xCount", 1, 12, 3)?
                .int("footprint.yCount", 1, 12, 3)?;
        }
        // Cylinder; other footprints fail at the selector
        _ => {
            builder
                .int("footprint.segments", 3, 32, 12)?
                .float("footprint.innerRadius", 0.0, 100.0, 0, 30.0)?
                .float("footprint.ringWidth", 5.0, 50.0, 1, 15.0)?;
        }
    }

    builder
        .int("heights.storyCount", 1, 32, 4)?
        .float("heights.height", 5.0, 500.0, 0, 40.0)?;
    match selectors.heights {
        MethodCategory::None => {}
        MethodCategory::Incremental => {
            builder.float("heights.angle", -1.0, 1.0, 2, 0.1)?;
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

fn reject_angle_method(selector: &'static str, method: MethodCategory) -> CodecResult<()> {
    match method {
        MethodCategory::None => Ok(()),
        other => Err(CodecError::UnknownSelector {
            selector,
            code: other.code(super::LATEST_VERSION).unwrap_or(-1),
            version: VERSION,
        }),
    }
}
