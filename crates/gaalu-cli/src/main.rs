use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use gaalu_core::even::{restrict_to_even, EvenLanes, LaneTable, LANES};
use gaalu_core::space::BladeSpace;
use gaalu_core::table::{
    build_geometric_table, make_dot_table, make_wedge_table, sanity_check, DotKind, Table,
};
use gaalu_emit::sv;

#[derive(Parser)]
#[command(
    name = "gaalu",
    about = "GAALU generator CLI",
    long_about = "Generates exact CGA blade multiplication tables and lowers them\ninto Q5.11 multiply-accumulate programs for the hardware ALU.",
    version,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Emit a SystemVerilog MAC program for one operation
    Emit {
        /// Operation to lower
        #[arg(long, value_enum)]
        op: Op,
        /// Dot product convention: hestenes, lcont, rcont
        #[arg(long, default_value = "hestenes")]
        dot_kind: String,
        /// Restrict to the 16-lane even sub-algebra
        #[arg(long)]
        even: bool,
        /// Skip the algebraic sanity-check pass
        #[arg(long)]
        no_sanity: bool,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the even 16×16 table for an operation
    Table {
        /// Operation to tabulate
        #[arg(long, value_enum)]
        op: TableOp,
        /// Dot product convention: hestenes, lcont, rcont
        #[arg(long, default_value = "hestenes")]
        dot_kind: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Op {
    /// Geometric product
    Mul,
    /// Outer (wedge) product
    Wedge,
    /// Inner (dot) product
    Dot,
    /// Norm squared
    Norm,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TableOp {
    Mul,
    Wedge,
    Dot,
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Emit { op, dot_kind, even, no_sanity, output } => {
            cmd_emit(op, &dot_kind, even, no_sanity, output.as_deref())
        }
        Commands::Table { op, dot_kind } => cmd_table(op, &dot_kind),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Build the table for one operation. The dot kind is validated before
/// any table work regardless of the selected operation.
fn build_op_table(
    space: &BladeSpace,
    wants_dot: bool,
    wedge: bool,
    dot_kind: &str,
) -> Result<Table, Box<dyn std::error::Error>> {
    let kind = DotKind::parse(dot_kind)?;
    let gp = build_geometric_table(space);
    Ok(if wants_dot {
        make_dot_table(space, &gp, kind)
    } else if wedge {
        make_wedge_table(space, &gp)
    } else {
        gp
    })
}

fn cmd_emit(
    op: Op,
    dot_kind: &str,
    even: bool,
    no_sanity: bool,
    output: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Validate the selection before any table work.
    let _ = DotKind::parse(dot_kind)?;
    let space = BladeSpace::new();
    if !no_sanity {
        sanity_check(&space)?;
    }

    let text = match (op, even) {
        (Op::Norm, false) => sv::emit_norm_body(&space),
        (Op::Norm, true) => {
            let lanes = EvenLanes::new(&space);
            format!("{}\n{}", sv::emit_even_header(&space, &lanes), sv::emit_even_norm_fn())
        }
        (_, false) => {
            let table = build_op_table(
                &space,
                matches!(op, Op::Dot),
                matches!(op, Op::Wedge),
                dot_kind,
            )?;
            sv::emit_mac_body(&space, &table)
        }
        (_, true) => {
            let table = build_op_table(
                &space,
                matches!(op, Op::Dot),
                matches!(op, Op::Wedge),
                dot_kind,
            )?;
            let lanes = EvenLanes::new(&space);
            let restricted = restrict_to_even(&space, &lanes, &table)?;
            let fn_name = match op {
                Op::Mul => "geometricProduct",
                Op::Wedge => "wedgeProduct",
                Op::Dot => "dotProduct",
                Op::Norm => unreachable!(),
            };
            format!(
                "{}\n{}",
                sv::emit_even_header(&space, &lanes),
                sv::emit_even_op_fn(&space, &lanes, fn_name, &restricted)
            )
        }
    };

    match output {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
            fs::write(path, &text)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn cmd_table(op: TableOp, dot_kind: &str) -> Result<(), Box<dyn std::error::Error>> {
    let space = BladeSpace::new();
    sanity_check(&space)?;
    let lanes = EvenLanes::new(&space);
    let table = build_op_table(
        &space,
        matches!(op, TableOp::Dot),
        matches!(op, TableOp::Wedge),
        dot_kind,
    )?;
    let even = restrict_to_even(&space, &lanes, &table)?;

    let title = match op {
        TableOp::Mul => "Geometric Product",
        TableOp::Wedge => "Wedge Product",
        TableOp::Dot => "Dot Product",
    };
    println!("=== 16x16 {} Table (null basis) ===", title);
    println!("Rows × Columns → Result");
    println!();

    print!("{:12}", "");
    for &col in lanes.order() {
        print!("{:>12}", space.name(col));
    }
    println!();
    println!("{}", "-".repeat(12 + 12 * LANES));

    for (row, &row_blade) in lanes.order().iter().enumerate() {
        print!("{:12}", space.name(row_blade));
        for col in 0..LANES {
            print!("{:>12}", cell_text(&even, row, col));
        }
        println!();
    }
    Ok(())
}

/// Grid cell for one operand-lane pair: "+idx"/"-idx" per contributing
/// output lane, or "0" when nothing contributes.
fn cell_text(even: &LaneTable, row: usize, col: usize) -> String {
    let mut parts = Vec::new();
    for out in 0..LANES {
        if let Some(&coeff) = even.cell(out).get(&(row, col)) {
            let sign = if coeff > 0 { '+' } else { '-' };
            for _ in 0..coeff.unsigned_abs() {
                parts.push(format!("{}{}", sign, out));
            }
        }
    }
    if parts.is_empty() {
        "0".to_string()
    } else {
        parts.concat()
    }
}
