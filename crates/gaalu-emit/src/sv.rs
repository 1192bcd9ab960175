//! SystemVerilog rendering.
//!
//! Every generated program is plain text consumed by the hardware
//! description: the micro-op form (ACCP/ACCN or mac/macSub) is an
//! output-format detail, so each instruction is rendered by a single
//! formatting function over the lowered [`MicroOp`] sequence. Repeated
//! emission of the same table is byte-identical.

use gaalu_core::even::{EvenLanes, LaneTable, LANES};
use gaalu_core::space::{BladeSpace, BLADES};
use gaalu_core::Table;

use crate::microop::{lower_lane_table, lower_table, AccDir, MicroOp};

/// Symbolic lane name used by the hardware layout: "L_" + uppercase
/// blade name (L_SCALAR, L_E12, L_EOI, ...).
pub fn lane_enum_name(space: &BladeSpace, blade: usize) -> String {
    format!("L_{}", space.name(blade).to_uppercase())
}

/// One full-algebra MAC step: `result.<r> = mac(result.<r>, a.<a>, b.<b>);`
fn render_mac_op(space: &BladeSpace, op: &MicroOp) -> String {
    let helper = match op.dir {
        AccDir::Add => "mac",
        AccDir::Sub => "macSub",
    };
    let out = space.name(op.out);
    format!(
        "result.{out} = {helper}(result.{out}, a.{a}, b.{b});",
        a = space.name(op.a),
        b = space.name(op.b),
    )
}

/// One even-lane accumulate step: `` `ACCP(L_X, al[L_Y], bl[L_Z]); ``
fn render_even_op(space: &BladeSpace, lanes: &EvenLanes, op: &MicroOp) -> String {
    let macro_name = match op.dir {
        AccDir::Add => "`ACCP",
        AccDir::Sub => "`ACCN",
    };
    format!(
        "  {macro_name}({out}, al[{a}], bl[{b}]);",
        out = lane_enum_name(space, lanes.blade_at(op.out)),
        a = lane_enum_name(space, lanes.blade_at(op.a)),
        b = lane_enum_name(space, lanes.blade_at(op.b)),
    )
}

/// Render micro-ops grouped per output lane, each nonempty group led
/// by a comment naming the lane. Empty lanes emit nothing — their
/// output stays zero.
fn render_groups(
    ops: &[MicroOp],
    lane_count: usize,
    comment_indent: &str,
    lane_name: impl Fn(usize) -> String,
    render: impl Fn(&MicroOp) -> String,
) -> Vec<String> {
    let mut lines = Vec::new();
    for lane in 0..lane_count {
        let group: Vec<&MicroOp> = ops.iter().filter(|op| op.out == lane).collect();
        if group.is_empty() {
            continue;
        }
        lines.push(format!("{}// {} contributions", comment_indent, lane_name(lane)));
        for op in group {
            lines.push(render(op));
        }
        lines.push(String::new());
    }
    lines
}

/// Full 32-lane MAC body for one operation table.
pub fn emit_mac_body(space: &BladeSpace, table: &Table) -> String {
    let ops = lower_table(table);
    let mut lines = vec![
        "// Auto-generated (MAC/Q5.11). Uses helpers: addQ511, subQ511, mulQ511, mac, macSub"
            .to_string(),
        "result = '0;".to_string(),
    ];
    lines.extend(render_groups(
        &ops,
        BLADES,
        "",
        |lane| space.name(lane),
        |op| render_mac_op(space, op),
    ));
    lines.join("\n")
}

/// Full 32-lane norm-squared body: every lane squared into one
/// saturated accumulator.
pub fn emit_norm_body(space: &BladeSpace) -> String {
    let mut lines = vec![
        "// Auto-generated norm-squared (Q5.11) into acc (signed [FP_W-1:0])".to_string(),
        "acc = '0;".to_string(),
    ];
    for blade in 0..BLADES {
        let name = space.name(blade);
        lines.push(format!(
            "acc = mac(acc, a.{name}[FP_W-1:0], a.{name}[FP_W-1:0]);"
        ));
    }
    lines.push(String::new());
    lines.join("\n")
}

/// Even-lane support header: lane enum, pack/unpack between the full
/// multivector struct and the 16-slot lane array, and the shared
/// round-then-saturate function.
pub fn emit_even_header(space: &BladeSpace, lanes: &EvenLanes) -> String {
    let mut lines = vec![
        "// Even subalgebra lane mapping (16 lanes)".to_string(),
        format!("localparam int EVEN_LANES = {};", LANES),
        "typedef enum int unsigned {".to_string(),
    ];
    let enum_body: Vec<String> = lanes
        .order()
        .iter()
        .enumerate()
        .map(|(i, &blade)| format!("  {} = {}", lane_enum_name(space, blade), i))
        .collect();
    lines.push(enum_body.join(",\n"));
    lines.push("} even_lane_e;".to_string());
    lines.push(String::new());

    lines.push("function automatic void pack_even(input ga_multivector_t mv,".to_string());
    lines.push(
        "                                  output logic signed [FP_W-1:0] lane[EVEN_LANES]);"
            .to_string(),
    );
    for &blade in lanes.order() {
        lines.push(format!(
            "  lane[{}] = mv.{};",
            lane_enum_name(space, blade),
            space.name(blade)
        ));
    }
    lines.push("endfunction".to_string());
    lines.push(String::new());

    lines.push(
        "function automatic ga_multivector_t unpack_even(input logic signed [FP_W-1:0] lane[EVEN_LANES]);"
            .to_string(),
    );
    lines.push("  ga_multivector_t mv = '0;".to_string());
    for &blade in lanes.order() {
        lines.push(format!(
            "  mv.{} = lane[{}];",
            space.name(blade),
            lane_enum_name(space, blade)
        ));
    }
    lines.push("  return mv;".to_string());
    lines.push("endfunction".to_string());
    lines.push(String::new());

    lines.push(
        "function automatic logic signed [FP_W-1:0] sat16_q511(longint signed acc_raw);"
            .to_string(),
    );
    lines.push("  longint signed r = acc_raw + (1 <<< (FP_FRAC-1));".to_string());
    lines.push("  longint signed s = r >>> FP_FRAC;".to_string());
    lines.push("  longint signed maxv = (1 <<< (FP_W-1)) - 1;".to_string());
    lines.push("  longint signed minv = -(1 <<< (FP_W-1));".to_string());
    lines.push("  if (s > maxv) s = maxv;".to_string());
    lines.push("  if (s < minv) s = minv;".to_string());
    lines.push("  return logic'(s[FP_W-1:0]);".to_string());
    lines.push("endfunction".to_string());
    lines.push(String::new());

    lines.join("\n")
}

/// Even-lane deferred-accumulate function for one operation
/// (geometricProduct, wedgeProduct, dotProduct).
pub fn emit_even_op_fn(
    space: &BladeSpace,
    lanes: &EvenLanes,
    name: &str,
    table: &LaneTable,
) -> String {
    let ops = lower_lane_table(table);
    let mut lines = vec![
        format!("function automatic ga_multivector_t {name}_even("),
        "  ga_multivector_t a,".to_string(),
        "  ga_multivector_t b".to_string(),
        ");".to_string(),
        "  longint signed acc[EVEN_LANES];".to_string(),
        "  logic signed [FP_W-1:0] al[EVEN_LANES], bl[EVEN_LANES];".to_string(),
        "  logic signed [FP_W-1:0] out_lane[EVEN_LANES];".to_string(),
        "  for (int i=0;i<EVEN_LANES;i++) acc[i] = 0;".to_string(),
        "  pack_even(a, al);".to_string(),
        "  pack_even(b, bl);".to_string(),
        "`define ACCP(idx, xa, xb) acc[idx] += longint'($signed(xa)) * longint'($signed(xb))"
            .to_string(),
        "`define ACCN(idx, xa, xb) acc[idx] -= longint'($signed(xa)) * longint'($signed(xb))"
            .to_string(),
    ];
    lines.extend(render_groups(
        &ops,
        LANES,
        "  ",
        |lane| lane_enum_name(space, lanes.blade_at(lane)),
        |op| render_even_op(space, lanes, op),
    ));
    lines.push("`undef ACCP".to_string());
    lines.push("`undef ACCN".to_string());
    lines.push("  for (int i=0;i<EVEN_LANES;i++) out_lane[i] = sat16_q511(acc[i]);".to_string());
    lines.push("  return unpack_even(out_lane);".to_string());
    lines.push("endfunction".to_string());
    lines.push(String::new());
    lines.join("\n")
}

/// Even-lane norm-squared: every lane squared into the scalar lane.
pub fn emit_even_norm_fn() -> String {
    [
        "function automatic ga_multivector_t norm_even(ga_multivector_t a);",
        "  longint signed acc_scalar = 0;",
        "  logic signed [FP_W-1:0] al[EVEN_LANES];",
        "  pack_even(a, al);",
        "  for (int i=0;i<EVEN_LANES;i++) begin",
        "    acc_scalar += longint'($signed(al[i])) * longint'($signed(al[i]));",
        "  end",
        "  ga_multivector_t r = '0;",
        "  r.scalar = sat16_q511(acc_scalar);",
        "  return r;",
        "endfunction",
        "",
    ]
    .join("\n")
}
