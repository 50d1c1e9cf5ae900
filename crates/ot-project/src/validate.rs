//! Model validation logic.
//!
//! Everything the integrator relies on without re-checking is enforced here:
//! table shapes, node numbering, and the physical sign of each constant.

use crate::schema::{CaseDef, LimitDef, ModelDef, NodeDef, NodeKindDef, LATEST_VERSION};
use ot_core::constants::{PHYSICAL_NODES, PLANET_ROW, SPACE_ROW, TOTAL_NODES};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Shape mismatch: {what} expected {expected} entries, found {actual}")]
    Shape {
        what: String,
        expected: usize,
        actual: usize,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn require_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive and finite"))
    }
}

fn require_fraction(field: &str, value: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, value, "must lie in [0, 1]"))
    }
}

pub fn validate_model(model: &ModelDef) -> Result<(), ValidationError> {
    if model.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: model.version,
        });
    }

    require_positive("orbit.period_s", model.orbit.period_s)?;
    let angles = model.orbit.critical_angles_deg;
    for (i, angle) in angles.iter().enumerate() {
        if !(0.0..=360.0).contains(angle) {
            return Err(invalid(
                format!("orbit.critical_angles_deg[{i}]"),
                *angle,
                "must lie in [0, 360]",
            ));
        }
    }
    if !angles.windows(2).all(|w| w[0] < w[1]) {
        return Err(ValidationError::InvalidValue {
            field: "orbit.critical_angles_deg".to_string(),
            value: format!("{angles:?}"),
            reason: "must be strictly increasing".to_string(),
        });
    }

    let env = &model.environment;
    require_positive("environment.planet_temperature_k", env.planet_temperature_k)?;
    require_positive("environment.space_temperature_k", env.space_temperature_k)?;
    require_positive("environment.solar_constant_w_m2", env.solar_constant_w_m2)?;
    require_fraction("environment.albedo", env.albedo)?;
    require_fraction("derating.efficiency", model.derating.efficiency)?;
    require_fraction("derating.effective_area", model.derating.effective_area)?;
    require_fraction("interior_emissivity", model.interior_emissivity)?;

    validate_nodes(&model.nodes)?;
    validate_matrix("conductance", &model.conductance, false)?;
    validate_matrix("view_factors", &model.view_factors, true)?;

    validate_case("cases.hot", &model.cases.hot, model)?;
    validate_case("cases.cold", &model.cases.cold, model)?;

    for limit in &model.limits {
        validate_limit(limit)?;
    }

    require_positive("simulation.dt_s", model.simulation.dt_s)?;
    require_positive("simulation.duration_s", model.simulation.duration_s)?;
    if model.simulation.duration_s < model.simulation.dt_s {
        return Err(invalid(
            "simulation.duration_s",
            model.simulation.duration_s,
            "must cover at least one time step",
        ));
    }

    Ok(())
}

fn validate_nodes(nodes: &[NodeDef]) -> Result<(), ValidationError> {
    if nodes.len() != PHYSICAL_NODES {
        return Err(ValidationError::Shape {
            what: "nodes".to_string(),
            expected: PHYSICAL_NODES,
            actual: nodes.len(),
        });
    }

    let mut seen = HashSet::new();
    for node in nodes {
        if node.id == 0 || node.id as usize > PHYSICAL_NODES {
            return Err(invalid(
                format!("node '{}' id", node.name),
                node.id as f64,
                "must lie in 1..=13",
            ));
        }
        if !seen.insert(node.id) {
            return Err(ValidationError::DuplicateId {
                id: node.id.to_string(),
                context: "nodes".to_string(),
            });
        }
        validate_node(node)?;
    }
    Ok(())
}

fn validate_node(node: &NodeDef) -> Result<(), ValidationError> {
    let prefix = format!("node {}", node.id);
    require_positive(&format!("{prefix}.mass_kg"), node.mass_kg)?;
    require_positive(&format!("{prefix}.cp_j_per_kg_k"), node.cp_j_per_kg_k)?;
    require_positive(&format!("{prefix}.area_m2"), node.area_m2)?;
    require_fraction(&format!("{prefix}.planet_view_factor"), node.planet_view_factor)?;

    if !node.kind.is_exposed() && node.planet_view_factor != 0.0 {
        return Err(invalid(
            format!("{prefix}.planet_view_factor"),
            node.planet_view_factor,
            "internal nodes cannot see the planet",
        ));
    }
    if node.kind.is_exposed() && node.face.is_none() {
        return Err(ValidationError::MissingReference {
            id: "face".to_string(),
            context: format!("{prefix} ({:?})", node.kind),
        });
    }
    Ok(())
}

fn validate_matrix(what: &str, rows: &[Vec<f64>], fractions: bool) -> Result<(), ValidationError> {
    if rows.len() != PHYSICAL_NODES {
        return Err(ValidationError::Shape {
            what: what.to_string(),
            expected: PHYSICAL_NODES,
            actual: rows.len(),
        });
    }
    for (i, row) in rows.iter().enumerate() {
        if row.len() != PHYSICAL_NODES {
            return Err(ValidationError::Shape {
                what: format!("{what}[{i}]"),
                expected: PHYSICAL_NODES,
                actual: row.len(),
            });
        }
        for (j, value) in row.iter().enumerate() {
            let field = format!("{what}[{i}][{j}]");
            if !value.is_finite() || *value < 0.0 {
                return Err(invalid(field, *value, "must be non-negative and finite"));
            }
            if fractions {
                require_fraction(&field, *value)?;
            }
        }
    }
    Ok(())
}

fn validate_case(what: &str, case: &CaseDef, model: &ModelDef) -> Result<(), ValidationError> {
    require_fraction(&format!("{what}.solar_array.absorptivity"), case.solar_array.absorptivity)?;
    require_fraction(&format!("{what}.solar_array.emissivity"), case.solar_array.emissivity)?;
    require_fraction(
        &format!("{what}.white_coating.absorptivity"),
        case.white_coating.absorptivity,
    )?;
    require_fraction(
        &format!("{what}.white_coating.emissivity"),
        case.white_coating.emissivity,
    )?;

    let initial = &case.initial_temperatures_k;
    if initial.len() != TOTAL_NODES {
        return Err(ValidationError::Shape {
            what: format!("{what}.initial_temperatures_k"),
            expected: TOTAL_NODES,
            actual: initial.len(),
        });
    }
    for (i, t) in initial.iter().enumerate() {
        require_positive(&format!("{what}.initial_temperatures_k[{i}]"), *t)?;
    }
    // Environment rows are held constant, so the initial column must agree.
    if initial[PLANET_ROW] != model.environment.planet_temperature_k {
        return Err(invalid(
            format!("{what}.initial_temperatures_k[{PLANET_ROW}]"),
            initial[PLANET_ROW],
            "must equal environment.planet_temperature_k",
        ));
    }
    if initial[SPACE_ROW] != model.environment.space_temperature_k {
        return Err(invalid(
            format!("{what}.initial_temperatures_k[{SPACE_ROW}]"),
            initial[SPACE_ROW],
            "must equal environment.space_temperature_k",
        ));
    }

    let mut seen = HashSet::new();
    for rule in &case.dissipation {
        let context = format!("{what}.dissipation");
        let node = model
            .nodes
            .iter()
            .find(|n| n.id == rule.node)
            .ok_or_else(|| ValidationError::MissingReference {
                id: rule.node.to_string(),
                context: context.clone(),
            })?;
        if node.kind != NodeKindDef::AvionicsBox {
            return Err(ValidationError::InvalidValue {
                field: format!("{context} node"),
                value: rule.node.to_string(),
                reason: "only avionics boxes dissipate power".to_string(),
            });
        }
        if !seen.insert(rule.node) {
            return Err(ValidationError::DuplicateId {
                id: rule.node.to_string(),
                context,
            });
        }
        if !rule.constant_w.is_finite() || rule.constant_w < 0.0 {
            return Err(invalid(
                format!("{context}[{}].constant_w", rule.node),
                rule.constant_w,
                "must be non-negative",
            ));
        }
        for band in &rule.bands {
            if !(band.start_deg < band.end_deg) {
                return Err(invalid(
                    format!("{context}[{}].bands.start_deg", rule.node),
                    band.start_deg,
                    "band start must precede band end",
                ));
            }
            if !band.power_w.is_finite() || band.power_w < 0.0 {
                return Err(invalid(
                    format!("{context}[{}].bands.power_w", rule.node),
                    band.power_w,
                    "must be non-negative",
                ));
            }
        }
    }
    Ok(())
}

fn validate_limit(limit: &LimitDef) -> Result<(), ValidationError> {
    if limit.node == 0 || limit.node as usize > PHYSICAL_NODES {
        return Err(ValidationError::MissingReference {
            id: limit.node.to_string(),
            context: format!("limit '{}'", limit.label),
        });
    }
    if !(limit.min_c < limit.max_c) {
        return Err(invalid(
            format!("limit '{}'.min_c", limit.label),
            limit.min_c,
            "must be below max_c",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::reference_model;

    #[test]
    fn reference_model_is_valid() {
        validate_model(&reference_model()).unwrap();
    }

    #[test]
    fn rejects_future_version() {
        let mut model = reference_model();
        model.version = LATEST_VERSION + 1;
        assert_eq!(
            validate_model(&model),
            Err(ValidationError::UnsupportedVersion {
                version: LATEST_VERSION + 1
            })
        );
    }

    #[test]
    fn rejects_short_initial_vector() {
        let mut model = reference_model();
        model.cases.cold.initial_temperatures_k.pop();
        let err = validate_model(&model).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Shape {
                expected: 15,
                actual: 14,
                ..
            }
        ));
    }

    #[test]
    fn rejects_ragged_matrix_row() {
        let mut model = reference_model();
        model.view_factors[4].push(0.0);
        let err = validate_model(&model).unwrap_err();
        assert!(err.to_string().contains("view_factors[4]"));
    }

    #[test]
    fn rejects_unordered_critical_angles() {
        let mut model = reference_model();
        model.orbit.critical_angles_deg = [90.0, 245.0, 115.0, 270.0];
        let err = validate_model(&model).unwrap_err();
        assert!(err.to_string().contains("strictly increasing"));
    }

    #[test]
    fn rejects_dissipation_on_panel() {
        let mut model = reference_model();
        model.cases.hot.dissipation[0].node = 1;
        let err = validate_model(&model).unwrap_err();
        assert!(err.to_string().contains("avionics"));
    }

    #[test]
    fn rejects_mismatched_environment_row() {
        let mut model = reference_model();
        model.cases.hot.initial_temperatures_k[SPACE_ROW] = 4.0;
        let err = validate_model(&model).unwrap_err();
        assert!(err.to_string().contains("space_temperature_k"));
    }

    #[test]
    fn rejects_duplicate_node_ids() {
        let mut model = reference_model();
        model.nodes[1].id = 1;
        assert!(matches!(
            validate_model(&model),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn rejects_duration_below_one_step() {
        let mut model = reference_model();
        model.simulation.duration_s = 0.5;
        assert!(validate_model(&model).is_err());
    }
}
