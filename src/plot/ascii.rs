//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks of a chosen design
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - node voltage versus temperature: `-` line
//! - optional ADC window limits: `=` rows

use crate::domain::{AdcWindow, ResponsePoint};

/// Render node voltage across temperature, with the ADC window when given.
pub fn render_response_plot(
    curve: &[ResponsePoint],
    window: Option<&AdcWindow>,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (t_min, t_max) = temperature_range(curve).unwrap_or((0.0, 1.0));
    let (v_min, v_max) = volt_range(curve, window).unwrap_or((0.0, 1.0));
    let (v_min, v_max) = pad_range(v_min, v_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Window limits first so the curve overlays them.
    if let Some(w) = window {
        for limit in [w.min_volts, w.max_volts] {
            let y = map_y(limit, v_min, v_max, height);
            for cell in grid[y].iter_mut() {
                *cell = '=';
            }
        }
    }

    let points: Vec<(f64, f64)> = curve.iter().map(|p| (p.celsius, p.volts)).collect();
    draw_curve(&mut grid, &points, t_min, t_max, v_min, v_max);

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: T=[{t_min:.1}, {t_max:.1}] °C | V=[{v_min:.3}, {v_max:.3}] V\n"
    ));

    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    out
}

fn temperature_range(curve: &[ResponsePoint]) -> Option<(f64, f64)> {
    let mut min_t = f64::INFINITY;
    let mut max_t = f64::NEG_INFINITY;
    for p in curve {
        min_t = min_t.min(p.celsius);
        max_t = max_t.max(p.celsius);
    }
    if min_t.is_finite() && max_t.is_finite() && max_t > min_t {
        Some((min_t, max_t))
    } else {
        None
    }
}

fn volt_range(curve: &[ResponsePoint], window: Option<&AdcWindow>) -> Option<(f64, f64)> {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;

    for p in curve {
        min_v = min_v.min(p.volts);
        max_v = max_v.max(p.volts);
    }
    if let Some(w) = window {
        min_v = min_v.min(w.min_volts.min(w.max_volts));
        max_v = max_v.max(w.min_volts.max(w.max_volts));
    }

    if min_v.is_finite() && max_v.is_finite() && max_v > min_v {
        Some((min_v, max_v))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(v: f64, v_min: f64, v_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((v - v_min) / (v_max - v_min)).clamp(0.0, 1.0);
    // v=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], t_min: f64, t_max: f64, v_min: f64, v_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(t, v) in curve {
        let x = map_x(t, t_min, t_max, width);
        let y = map_y(v, v_min, v_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, y, '-');
        } else {
            grid[y][x] = '-';
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish). Overwrites every cell it crosses, window rows included.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
