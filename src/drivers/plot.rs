use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::*;
use crate::drivers::error::MonitorError;
use crate::types::TickFrame;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub palette: Vec<RGBColor>,
    pub marker_size: i32,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            background: RGBColor(255, 255, 255),
            // matplotlib "tab10"
            palette: vec![
                RGBColor(31, 119, 180),
                RGBColor(255, 127, 14),
                RGBColor(44, 160, 44),
                RGBColor(214, 39, 40),
                RGBColor(148, 103, 189),
                RGBColor(140, 86, 75),
                RGBColor(227, 119, 194),
                RGBColor(127, 127, 127),
                RGBColor(188, 189, 34),
                RGBColor(23, 190, 207),
            ],
            marker_size: 2,
        }
    }
}
/// Renders one tick's table to PNG bytes: every column against row index,
/// lines with point markers, titled with the tick number.
pub fn render_tick_png(frame: &TickFrame, style: &PlotStyle) -> Result<Vec<u8>, MonitorError> {
    if style.palette.is_empty() {
        return Err(MonitorError::Plot("palette has no colors".into()));
    }
    let table = &frame.table;
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let x_max = table.row_count().saturating_sub(1).max(1) as f64;
        let (y_min, y_max) = match table.value_range() {
            Some((lo, hi)) if (hi - lo).abs() > f64::EPSILON => (lo, hi),
            Some((v, _)) => (v - 1.0, v + 1.0),
            None => (-1.0, 1.0),
        };
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(frame.tick.to_string(), ("sans-serif", 20).into_font())
            .set_label_area_size(LabelAreaPosition::Left, 50)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(0f64..x_max, y_min..y_max)?;
        chart
            .configure_mesh()
            .x_desc("sample index")
            .light_line_style(&BLACK.mix(0.05))
            .draw()?;
        for (idx, name) in table.columns().as_slice().iter().enumerate() {
            let color = style.palette[idx % style.palette.len()];
            // Every column gets a legend entry, even one with nothing to draw.
            chart
                .draw_series(LineSeries::new(std::iter::empty::<(f64, f64)>(), &color))?
                .label(name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
            for run in table.runs(idx) {
                let points = run.iter().map(|p| (p[0], p[1]));
                chart.draw_series(LineSeries::new(points.clone(), &color))?;
                chart.draw_series(
                    points.map(|p| Circle::new(p, style.marker_size, color.filled())),
                )?;
            }
        }
        chart
            .configure_series_labels()
            .border_style(&BLACK.mix(0.2))
            .background_style(&style.background.mix(0.8))
            .draw()?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, MonitorError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| MonitorError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
