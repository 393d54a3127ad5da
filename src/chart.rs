//! Bar chart of the display table, coloured by concentration.

use std::error::Error;

use plotters::prelude::*;
use serde::{Serialize, Serializer};

use crate::pollutants::DisplayRow;

/// Stops of the Plasma sequential scale, dark to bright.
pub const PLASMA: [RGBColor; 10] = [
    RGBColor(0x0d, 0x08, 0x87),
    RGBColor(0x46, 0x03, 0x9f),
    RGBColor(0x72, 0x01, 0xa8),
    RGBColor(0x9c, 0x17, 0x9e),
    RGBColor(0xbd, 0x37, 0x86),
    RGBColor(0xd8, 0x57, 0x6b),
    RGBColor(0xed, 0x79, 0x53),
    RGBColor(0xfb, 0x9f, 0x3a),
    RGBColor(0xfd, 0xca, 0x26),
    RGBColor(0xf0, 0xf9, 0x21),
];

/// A continuous scale over `[low, high]`, interpolating linearly between
/// evenly spaced stops.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    stops: &'static [RGBColor],
    low: f64,
    high: f64,
}

impl ColorScale {
    pub fn plasma(low: f64, high: f64) -> Self {
        ColorScale { stops: &PLASMA, low, high }
    }

    pub fn color_at(&self, value: f64) -> RGBColor {
        let span = self.high - self.low;
        let t = if span > 0.0 { (value - self.low) / span } else { 0.0 };
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let last = self.stops.len() - 1;
        let position = t * last as f64;
        let index = (position.floor() as usize).min(last);
        if index == last {
            return self.stops[last];
        }

        let frac = position - index as f64;
        let RGBColor(r0, g0, b0) = self.stops[index];
        let RGBColor(r1, g1, b1) = self.stops[index + 1];
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        RGBColor(mix(r0, r1), mix(g0, g1), mix(b0, b1))
    }
}

pub fn hex(color: RGBColor) -> String {
    let RGBColor(r, g, b) = color;
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

fn serialize_hex<S: Serializer>(color: &RGBColor, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex(*color))
}

#[derive(Serialize, Debug, Clone)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    #[serde(serialize_with = "serialize_hex")]
    pub color: RGBColor,
}

#[derive(Serialize, Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn from_table(rows: &[DisplayRow]) -> Self {
        let low = rows.iter().map(|r| r.concentration).fold(f64::INFINITY, f64::min);
        let high = rows.iter().map(|r| r.concentration).fold(f64::NEG_INFINITY, f64::max);
        let scale = if rows.is_empty() {
            ColorScale::plasma(0.0, 0.0)
        } else {
            ColorScale::plasma(low, high)
        };

        let bars = rows
            .iter()
            .map(|row| Bar {
                label: row.label.clone(),
                value: row.concentration,
                color: scale.color_at(row.concentration),
            })
            .collect();

        BarChart {
            title: "Pollutant Concentrations".to_string(),
            x_label: "Pollutant".to_string(),
            y_label: "Concentration".to_string(),
            bars,
        }
    }

    /// The y axis always includes zero and leaves 10% headroom past the
    /// extreme values on either side.
    fn value_range(&self) -> (f64, f64) {
        let low = self.bars.iter().map(|b| b.value).fold(0.0, f64::min);
        let high = self.bars.iter().map(|b| b.value).fold(0.0, f64::max);
        if high - low > 0.0 {
            (low * 1.1, high * 1.1)
        } else {
            (0.0, 1.0)
        }
    }

    /// Draws the chart as a standalone SVG document. Returns `None` when
    /// there is nothing to draw.
    pub fn to_svg(&self, size: (u32, u32)) -> Result<Option<String>, Box<dyn Error>> {
        if self.bars.is_empty() {
            return Ok(None);
        }

        let count = self.bars.len() as u32;
        let (low, high) = self.value_range();
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            root.fill(&WHITE)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(self.title.as_str(), ("sans-serif", 22).into_font())
                .margin(16)
                .x_label_area_size(48)
                .y_label_area_size(56)
                .build_cartesian_2d((0..count).into_segmented(), low..high)?;

            let label_of = |segment: &SegmentValue<u32>| match segment {
                SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => self
                    .bars
                    .get(*i as usize)
                    .map(|b| b.label.clone())
                    .unwrap_or_default(),
                SegmentValue::Last => String::new(),
            };

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(self.bars.len())
                .x_label_formatter(&label_of)
                .x_desc(self.x_label.as_str())
                .y_desc(self.y_label.as_str())
                .draw()?;

            chart.draw_series(self.bars.iter().zip(0..count).map(|(bar, i)| {
                Rectangle::new(
                    [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), bar.value)],
                    bar.color.filled(),
                )
            }))?;

            root.present()?;
        }
        Ok(Some(svg))
    }
}
