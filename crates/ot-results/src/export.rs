//! CSV export of node temperature series.

use std::io::Write;

use ot_core::NodeId;
use ot_sim::TemperatureHistory;

use crate::ResultsResult;
use crate::types::TemperatureUnit;

/// Write `time_s` plus one column per node, in the requested unit.
///
/// An empty `nodes` slice exports the 13 physical nodes.
pub fn write_csv<W: Write>(
    writer: W,
    history: &TemperatureHistory,
    nodes: &[NodeId],
    unit: TemperatureUnit,
) -> ResultsResult<()> {
    let selected: Vec<NodeId> = if nodes.is_empty() {
        NodeId::physical().collect()
    } else {
        nodes.to_vec()
    };

    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["time_s".to_string()];
    header.extend(
        selected
            .iter()
            .map(|id| format!("T{}_{}", id.number(), unit.suffix())),
    );
    wtr.write_record(&header)?;

    for p in 0..history.steps() {
        let column = history.column(p);
        let mut row = Vec::with_capacity(selected.len() + 1);
        row.push(history.time_s(p).to_string());
        row.extend(selected.iter().map(|id| unit.convert(column[id.row()]).to_string()));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    fn history() -> TemperatureHistory {
        let data = DMatrix::from_fn(15, 2, |r, c| 273.15 + r as f64 + 10.0 * c as f64);
        TemperatureHistory::from_matrix(data, 2.0).unwrap()
    }

    #[test]
    fn celsius_export_of_selected_nodes() {
        let mut out = Vec::new();
        let nodes = [NodeId::from_number(1).unwrap(), NodeId::PLANET];
        write_csv(&mut out, &history(), &nodes, TemperatureUnit::Celsius).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "time_s,T1_C,T14_C");
        assert_eq!(lines.len(), 3);
        let last: Vec<f64> = lines[2].split(',').map(|v| v.parse().unwrap()).collect();
        assert_eq!(last[0], 2.0);
        assert!((last[1] - 10.0).abs() < 1e-9);
        assert!((last[2] - 23.0).abs() < 1e-9);
    }

    #[test]
    fn default_selection_is_physical_nodes() {
        let mut out = Vec::new();
        write_csv(&mut out, &history(), &[], TemperatureUnit::Kelvin).unwrap();
        let text = String::from_utf8(out).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header.split(',').count(), 14);
        assert!(header.ends_with("T13_K"));
    }
}
