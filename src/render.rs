use crate::config::{ProjectionView, RenderConfig};
use crate::ir::{ConnectorSpec, Scenario};
use crate::pairing::vector::{dot, sub};
use crate::pairing::{DEFAULT_TOLERANCE, Frame, UnitFrame, Vec3, normalize_frame};
use crate::pairing_dump::PairingDump;
use crate::theme::Theme;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

/// Smallest drawing span; keeps a single point or a collinear set from dividing by zero.
const MIN_SPAN: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Marker {
    Inlet,
    Outlet,
    Target,
}

struct Projector {
    frame: UnitFrame,
    view: ProjectionView,
    min: (f64, f64),
    scale: f64,
    offset: (f64, f64),
    height: f64,
}

impl Projector {
    fn new(frame: &Frame, view: ProjectionView, points: &[Vec3], config: &RenderConfig) -> Self {
        let frame = normalize_frame(frame, DEFAULT_TOLERANCE).unwrap_or(UnitFrame {
            origin: frame.origin,
            x: Vec3::X,
            y: Vec3::Y,
            z: Vec3::Z,
        });
        let mut projector = Self {
            frame,
            view,
            min: (0.0, 0.0),
            scale: 1.0,
            offset: (0.0, 0.0),
            height: config.height as f64,
        };
        let local: Vec<(f64, f64)> = points
            .iter()
            .chain(std::iter::once(&frame.origin))
            .map(|p| projector.local(*p))
            .collect();
        let (mut min_u, mut min_v) = (f64::INFINITY, f64::INFINITY);
        let (mut max_u, mut max_v) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for (u, v) in &local {
            min_u = min_u.min(*u);
            min_v = min_v.min(*v);
            max_u = max_u.max(*u);
            max_v = max_v.max(*v);
        }
        let span_u = (max_u - min_u).max(MIN_SPAN);
        let span_v = (max_v - min_v).max(MIN_SPAN);
        let pad = config.padding as f64;
        let avail_w = (config.width as f64 - 2.0 * pad).max(1.0);
        let avail_h = (config.height as f64 - 2.0 * pad).max(1.0);
        let scale = (avail_w / span_u).min(avail_h / span_v);
        projector.min = (min_u, min_v);
        projector.scale = scale;
        projector.offset = (
            pad + (avail_w - span_u * scale) / 2.0,
            pad + (avail_h - span_v * scale) / 2.0,
        );
        projector
    }

    fn local(&self, p: Vec3) -> (f64, f64) {
        let d = sub(p, self.frame.origin);
        let (a, b) = match self.view {
            ProjectionView::Xz => (self.frame.x, self.frame.z),
            ProjectionView::Xy => (self.frame.x, self.frame.y),
            ProjectionView::Yz => (self.frame.y, self.frame.z),
        };
        (dot(d, a), dot(d, b))
    }

    /// SVG coordinates; the vertical frame axis points up on screen.
    fn screen(&self, p: Vec3) -> (f64, f64) {
        let (u, v) = self.local(p);
        let x = self.offset.0 + (u - self.min.0) * self.scale;
        let y = self.height - (self.offset.1 + (v - self.min.1) * self.scale);
        (x, y)
    }
}

pub fn render_svg(scenario: &Scenario, dump: &PairingDump, theme: &Theme, config: &RenderConfig) -> String {
    let mut svg = String::new();
    let width = config.width.max(100.0);
    let height = config.height.max(100.0);
    let config = RenderConfig {
        width,
        height,
        ..config.clone()
    };

    let mut points: Vec<Vec3> = vec![scenario.inlet.point()];
    points.extend(scenario.outlets.iter().map(ConnectorSpec::point));
    points.extend(scenario.targets.iter().map(ConnectorSpec::point));
    let projector = Projector::new(&dump.frame, config.view, &points, &config);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    let (ox, oy) = projector.screen(projector.frame.origin);
    svg.push_str(&format!(
        "<line x1=\"0\" y1=\"{oy:.2}\" x2=\"{width}\" y2=\"{oy:.2}\" stroke=\"{}\" stroke-width=\"1\" stroke-dasharray=\"4 4\"/>",
        theme.axis_color
    ));
    svg.push_str(&format!(
        "<line x1=\"{ox:.2}\" y1=\"0\" x2=\"{ox:.2}\" y2=\"{height}\" stroke=\"{}\" stroke-width=\"1\" stroke-dasharray=\"4 4\"/>",
        theme.axis_color
    ));

    for pair in &dump.pairs {
        let (x1, y1) = projector.screen(Vec3::from(pair.outlet_position));
        let (x2, y2) = projector.screen(Vec3::from(pair.target_position));
        svg.push_str(&format!(
            "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
            theme.pair_line_color
        ));
    }

    let unmatched: HashSet<&str> = dump
        .unmatched_outlets
        .iter()
        .chain(dump.unmatched_targets.iter())
        .map(String::as_str)
        .collect();
    let paired: HashSet<&str> = dump
        .pairs
        .iter()
        .flat_map(|p| [p.outlet.as_str(), p.target.as_str()])
        .collect();

    let connectors = scenario
        .outlets
        .iter()
        .map(|c| (c, Marker::Outlet))
        .chain(scenario.targets.iter().map(|c| (c, Marker::Target)));
    for (connector, marker) in connectors {
        let id = connector.id.as_str();
        let is_unmatched = unmatched.contains(id);
        if !paired.contains(id) && !(is_unmatched && config.show_unmatched) {
            continue;
        }
        let color = if is_unmatched {
            theme.unmatched_color.as_str()
        } else if marker == Marker::Outlet {
            theme.outlet_color.as_str()
        } else {
            theme.target_color.as_str()
        };
        svg.push_str(&connector_svg(&projector, connector, marker, color, theme, &config));
    }
    svg.push_str(&connector_svg(
        &projector,
        &scenario.inlet,
        Marker::Inlet,
        &theme.inlet_color,
        theme,
        &config,
    ));

    svg.push_str("</svg>");
    svg
}

fn connector_svg(
    projector: &Projector,
    connector: &ConnectorSpec,
    marker: Marker,
    color: &str,
    theme: &Theme,
    config: &RenderConfig,
) -> String {
    let (x, y) = projector.screen(connector.point());
    let r = config.connector_radius as f64;
    let mut out = match marker {
        Marker::Outlet => format!("<circle cx=\"{x:.2}\" cy=\"{y:.2}\" r=\"{r:.2}\" fill=\"{color}\"/>"),
        Marker::Target => format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{color}\"/>",
            x - r,
            y - r,
            r * 2.0,
            r * 2.0
        ),
        Marker::Inlet => format!(
            "<path d=\"M {:.2} {:.2} L {:.2} {:.2} L {:.2} {:.2} L {:.2} {:.2} z\" fill=\"{color}\"/>",
            x,
            y - r * 1.4,
            x + r * 1.4,
            y,
            x,
            y + r * 1.4,
            x - r * 1.4,
            y
        ),
    };
    let label_x = x + config.label_offset as f64;
    let label_y = y - config.label_offset as f64;
    out.push_str(&format!(
        "<text x=\"{label_x:.2}\" y=\"{label_y:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        escape_xml(&theme.font_family),
        theme.font_size,
        theme.text_color,
        escape_xml(&connector.id)
    ));
    out
}

/// Plain-text summary of a pairing, one row per pair.
pub fn render_text(dump: &PairingDump) -> String {
    let mut out = String::new();
    out.push_str(&format!("scenario: {}\n", dump.scenario));
    if let Some(system) = &dump.system {
        out.push_str(&format!("system:   {}\n", system));
    }
    out.push_str(&format!("split:    {:?}\n", dump.split_axis));
    out.push_str(&format!(
        "{:<16} {:<12} {:<12} {:>10} {:>10} {:>10}\n",
        "segment", "outlet", "target", "out deg", "tgt deg", "length"
    ));
    for (pair, segment) in dump.pairs.iter().zip(dump.segments.iter()) {
        out.push_str(&format!(
            "{:<16} {:<12} {:<12} {:>10.2} {:>10.2} {:>10.3}\n",
            segment.name, pair.outlet, pair.target, pair.outlet_angle, pair.target_angle, pair.length
        ));
    }
    out.push_str(&format!("total length: {:.3}\n", dump.total_length));
    if !dump.unmatched_outlets.is_empty() {
        out.push_str(&format!("unmatched outlets: {}\n", dump.unmatched_outlets.join(", ")));
    }
    if !dump.unmatched_targets.is_empty() {
        out.push_str(&format!("unmatched targets: {}\n", dump.unmatched_targets.join(", ")));
    }
    out
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    write_output_text(svg, output)
}

pub fn write_output_text(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        }
        None => {
            print!("{}", text);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .map(|s| s.trim().trim_matches('"').to_string())
        .unwrap_or_else(|| "Inter".to_string());
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .or_else(|| usvg::Size::from_wh(800.0, 600.0))
        .ok_or_else(|| anyhow::anyhow!("invalid render size"))?;
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
