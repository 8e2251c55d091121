//! PDF Drawing Backend
//! A `plotters` backend that writes vector PDF operators onto a single page.
//!
//! One pixel maps to one PDF point. Text uses the base-14 Helvetica fonts
//! with WinAnsi encoding, so glyphs outside Latin-1 are replaced by `?`.
//! Transparency is composited over a white page.

use plotters_backend::text_anchor::{HPos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
    FontStyle, FontTransform,
};
use std::fmt::Write as _;
use std::io::Write as _;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("failed to format pdf operators: {0}")]
    Format(#[from] std::fmt::Error),
    #[error("failed to assemble pdf document: {0}")]
    Io(#[from] std::io::Error),
}

/// Average Helvetica advance width as a fraction of the font size.
const CHAR_WIDTH: f64 = 0.55;
/// Bezier handle length for a quarter circle.
const KAPPA: f64 = 0.552_284_75;

type PdfResult = Result<(), DrawingErrorKind<PdfError>>;

fn draw_err<E: Into<PdfError>>(e: E) -> DrawingErrorKind<PdfError> {
    DrawingErrorKind::DrawingError(e.into())
}

pub struct PdfBackend<'a> {
    size: (u32, u32),
    content: String,
    target: &'a mut Vec<u8>,
    presented: bool,
}

impl<'a> PdfBackend<'a> {
    /// The finished document is written into `target` on `present` (or drop).
    pub fn with_buffer(target: &'a mut Vec<u8>, size: (u32, u32)) -> Self {
        Self {
            size,
            content: String::new(),
            target,
            presented: false,
        }
    }

    fn y(&self, y: f64) -> f64 {
        self.size.1 as f64 - y
    }

    fn set_fill(&mut self, color: BackendColor) -> Result<(), std::fmt::Error> {
        let (r, g, b) = over_white(color);
        writeln!(self.content, "{} {} {} rg", r, g, b)
    }

    fn set_stroke<S: BackendStyle>(&mut self, style: &S) -> Result<(), std::fmt::Error> {
        let (r, g, b) = over_white(style.color());
        writeln!(
            self.content,
            "{} {} {} RG {} w",
            r,
            g,
            b,
            style.stroke_width().max(1)
        )
    }

    fn path_ops<I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        points: I,
    ) -> Result<bool, std::fmt::Error> {
        let mut any = false;
        for (i, (x, y)) in points.into_iter().enumerate() {
            let op = if i == 0 { "m" } else { "l" };
            let y = num(self.y(y as f64));
            writeln!(self.content, "{} {} {}", x, y, op)?;
            any = true;
        }
        Ok(any)
    }

    fn circle_ops(&mut self, (cx, cy): BackendCoord, radius: f64) -> Result<(), std::fmt::Error> {
        let (cx, cy) = (cx as f64, self.y(cy as f64));
        let (r, k) = (radius, radius * KAPPA);
        writeln!(self.content, "{} {} m", num(cx + r), num(cy))?;
        let quarters = [
            (cx + r, cy + k, cx + k, cy + r, cx, cy + r),
            (cx - k, cy + r, cx - r, cy + k, cx - r, cy),
            (cx - r, cy - k, cx - k, cy - r, cx, cy - r),
            (cx + k, cy - r, cx + r, cy - k, cx + r, cy),
        ];
        for (x1, y1, x2, y2, x3, y3) in quarters {
            writeln!(
                self.content,
                "{} {} {} {} {} {} c",
                num(x1),
                num(y1),
                num(x2),
                num(y2),
                num(x3),
                num(y3)
            )?;
        }
        Ok(())
    }
}

impl DrawingBackend for PdfBackend<'_> {
    type ErrorType = PdfError;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> PdfResult {
        Ok(())
    }

    fn present(&mut self) -> PdfResult {
        let document = build_document(self.size, &self.content).map_err(draw_err)?;
        self.target.clear();
        self.target.extend_from_slice(&document);
        self.presented = true;
        Ok(())
    }

    fn draw_pixel(&mut self, (x, y): BackendCoord, color: BackendColor) -> PdfResult {
        if color.alpha <= 0.0 {
            return Ok(());
        }
        self.set_fill(color).map_err(draw_err)?;
        let y = self.y(y as f64 + 1.0);
        writeln!(self.content, "{} {} 1 1 re f", x, num(y)).map_err(draw_err)
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> PdfResult {
        self.set_stroke(style).map_err(draw_err)?;
        self.path_ops([from, to]).map_err(draw_err)?;
        writeln!(self.content, "S").map_err(draw_err)
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> PdfResult {
        let (x0, x1) = (upper_left.0.min(bottom_right.0), upper_left.0.max(bottom_right.0));
        let (y0, y1) = (upper_left.1.min(bottom_right.1), upper_left.1.max(bottom_right.1));
        let bottom = self.y(y1 as f64);
        if fill {
            self.set_fill(style.color()).map_err(draw_err)?;
        } else {
            self.set_stroke(style).map_err(draw_err)?;
        }
        writeln!(
            self.content,
            "{} {} {} {} re {}",
            x0,
            num(bottom),
            x1 - x0,
            y1 - y0,
            if fill { "f" } else { "S" }
        )
        .map_err(draw_err)
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> PdfResult {
        self.set_stroke(style).map_err(draw_err)?;
        if self.path_ops(path).map_err(draw_err)? {
            writeln!(self.content, "S").map_err(draw_err)?;
        }
        Ok(())
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> PdfResult {
        if fill {
            self.set_fill(style.color()).map_err(draw_err)?;
        } else {
            self.set_stroke(style).map_err(draw_err)?;
        }
        self.circle_ops(center, radius as f64).map_err(draw_err)?;
        writeln!(self.content, "{}", if fill { "f" } else { "S" }).map_err(draw_err)
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> PdfResult {
        self.set_fill(style.color()).map_err(draw_err)?;
        if self.path_ops(vert).map_err(draw_err)? {
            writeln!(self.content, "h f").map_err(draw_err)?;
        }
        Ok(())
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> PdfResult {
        let size = style.size();
        let (width, _) = text_extent(text, size);

        // Offset from the anchor to the baseline start, in unrotated text space
        let dx = match style.anchor().h_pos {
            HPos::Left => 0.0,
            HPos::Center => -width / 2.0,
            HPos::Right => -width,
        };
        let dy = match style.anchor().v_pos {
            VPos::Top => size * 0.8,
            VPos::Center => size * 0.35,
            VPos::Bottom => -size * 0.2,
        };

        let degrees: f64 = match style.transform() {
            FontTransform::None => 0.0,
            FontTransform::Rotate90 => 90.0,
            FontTransform::Rotate180 => 180.0,
            FontTransform::Rotate270 => 270.0,
        };
        let (sin, cos) = degrees.to_radians().sin_cos();
        let origin_x = pos.0 as f64 + dx * cos - dy * sin;
        let origin_y = pos.1 as f64 + dx * sin + dy * cos;

        let font = match style.style() {
            FontStyle::Bold => "F2",
            _ => "F1",
        };
        let (r, g, b) = over_white(style.color());
        let origin_y = self.y(origin_y);
        writeln!(
            self.content,
            "BT /{} {} Tf {} {} {} rg {} {} {} {} {} {} Tm ({}) Tj ET",
            font,
            num(size),
            r,
            g,
            b,
            num(cos),
            num(-sin),
            num(sin),
            num(cos),
            num(origin_x),
            num(origin_y),
            escape_text(text)
        )
        .map_err(draw_err)
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<PdfError>> {
        let (w, h) = text_extent(text, style.size());
        Ok((w.ceil() as u32, h.ceil() as u32))
    }
}

impl Drop for PdfBackend<'_> {
    fn drop(&mut self) {
        if !self.presented {
            if let Err(e) = self.present() {
                log::warn!("failed to finish pdf on drop: {e}");
            }
        }
    }
}

fn text_extent(text: &str, size: f64) -> (f64, f64) {
    (text.chars().count() as f64 * size * CHAR_WIDTH, size)
}

/// Composite a possibly translucent color over white, as PDF color components.
fn over_white(color: BackendColor) -> (String, String, String) {
    let alpha = color.alpha.clamp(0.0, 1.0);
    let channel = |c: u8| num((alpha * c as f64 + (1.0 - alpha) * 255.0) / 255.0);
    (
        channel(color.rgb.0),
        channel(color.rgb.1),
        channel(color.rgb.2),
    )
}

/// Compact decimal: at most three fractional digits, no trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        _ => s.to_string(),
    }
}

/// PDF literal string body in WinAnsi, ASCII-only on the wire.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            '\u{a0}'..='\u{ff}' => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            _ => out.push('?'),
        }
    }
    out
}

fn build_document((width, height): (u32, u32), content: &str) -> Result<Vec<u8>, PdfError> {
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {width} {height}] \
             /Resources << /Font << /F1 5 0 R /F2 6 0 R >> >> /Contents 4 0 R >>"
        ),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    let mut out: Vec<u8> = Vec::new();
    out.write_all(b"%PDF-1.4\n")?;

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        write!(out, "{} 0 obj\n{}\nendobj\n", i + 1, body)?;
    }

    let xref = out.len();
    write!(out, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1)?;
    for offset in offsets {
        write!(out, "{:010} 00000 n \n", offset)?;
    }
    write!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref
    )?;
    Ok(out)
}
