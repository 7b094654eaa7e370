//! Text and JSON output.

use std::io::Write;

use u_palletize_core::{MaterialTable, RankedConfiguration, SearchResult};
use u_palletize_pallet::PlacedBox;

const RULE: usize = 118;

/// Writes the ranked configurations as a table.
pub fn write_table(out: &mut impl Write, result: &SearchResult) -> std::io::Result<()> {
    writeln!(out, "{:=<width$}", "", width = RULE)?;
    writeln!(
        out,
        "PALLET {} x {} x {}  ({} cells, {} packings, {} unique, {}ms)",
        result.pallet.length,
        result.pallet.width,
        result.pallet.load_height,
        result.stats.cells,
        result.stats.packings,
        result.stats.unique,
        result.computation_time_ms
    )?;
    writeln!(out, "{:=<width$}", "", width = RULE)?;

    if result.is_empty() {
        writeln!(out, "No feasible configuration.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:>4} {:<18} {:<18} {:>5} {:>6} {:>7} {:>7} {:>7} {:>7} {:>8} {:>10}",
        "Rank", "Pattern", "Outer box", "Qty", "Yield", "Layers", "Total", "Eff%", "Kg", "SF", "Score"
    )?;
    writeln!(out, "{:-<width$}", "", width = RULE)?;

    for ranked in &result.configurations {
        write_row(out, ranked)?;
    }

    writeln!(out, "{:=<width$}", "", width = RULE)?;
    Ok(())
}

fn write_row(out: &mut impl Write, ranked: &RankedConfiguration) -> std::io::Result<()> {
    let c = &ranked.configuration;
    let flag = if c.is_unsafe() { " !" } else { "" };
    writeln!(
        out,
        "{:>4} {:<18} {:<18} {:>5} {:>6} {:>7} {:>7} {:>7.1} {:>7.2} {:>8.1} {:>10}{}",
        ranked.rank,
        c.label().name(),
        c.outer.to_string(),
        c.qty,
        c.yield_per_layer,
        c.pallet_layers,
        c.total,
        c.efficiency,
        c.box_weight_kg,
        c.strength.safety_factor,
        ranked.score,
        flag
    )
}

/// Writes the strength table.
pub fn write_materials(out: &mut impl Write, table: &MaterialTable) -> std::io::Result<()> {
    writeln!(out, "{:<10} {:>8} {:>10} {:>8}", "Flute", "ECT", "Caliper", "Margin")?;
    writeln!(out, "{:-<39}", "")?;
    for (kind, profile) in table.iter() {
        writeln!(
            out,
            "{:<10} {:>8.1} {:>10.1} {:>8}",
            kind.name(),
            profile.ect,
            profile.caliper,
            kind.default_margin()
        )?;
    }
    Ok(())
}

/// Writes placement coordinates, one box per line.
pub fn write_layout(
    out: &mut impl Write,
    ranked: &RankedConfiguration,
    boxes: &[PlacedBox],
    units: &[PlacedBox],
) -> std::io::Result<()> {
    let c = &ranked.configuration;
    writeln!(
        out,
        "Rank {}: {} of {} boxes, {} per layer, {} layers",
        ranked.rank,
        c.label(),
        c.outer,
        c.yield_per_layer,
        c.pallet_layers
    )?;
    writeln!(
        out,
        "{:>5} {:>9} {:>9} {:>9} {:>8} {:>8} {:>8}",
        "Layer", "x", "y", "z", "dx", "dy", "dz"
    )?;
    for b in boxes {
        write_placed(out, b)?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Box interior: {} x {} x {} units of {}",
        c.packing.columns, c.packing.rows, c.packing.layers, c.packing.unit
    )?;
    for u in units {
        write_placed(out, u)?;
    }
    Ok(())
}

fn write_placed(out: &mut impl Write, b: &PlacedBox) -> std::io::Result<()> {
    writeln!(
        out,
        "{:>5} {:>9.1} {:>9.1} {:>9.1} {:>8.1} {:>8.1} {:>8.1}",
        b.layer,
        b.position.x,
        b.position.y,
        b.position.z,
        b.dimensions.x,
        b.dimensions.y,
        b.dimensions.z
    )
}

/// Writes any serializable value as pretty JSON.
pub fn write_json<T: serde::Serialize>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
