//! Certificate PDF renderer backed by `printpdf`.
//!
//! Renders the fixed A4 certificate layout: blue border frame, centered
//! title, recipient name, score line, issuance date, and signature line.
//! Rendering is deterministic given the certificate fields; no randomness,
//! no external calls.

use async_trait::async_trait;
use printpdf::{BuiltinFont, Color, Line, Mm, PdfDocument, Point, Rgb};

use crate::domain::certificate::Certificate;
use crate::ports::{CertificateRenderer, RenderError};

// A4 page in millimeters.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;

/// Border inset from the page edge.
const BORDER_MARGIN_MM: f32 = 10.0;

/// Width of one PDF point in millimeters.
const PT_TO_MM: f32 = 0.352_778;

/// Average Helvetica glyph width as a fraction of the font size. Used for
/// the horizontal centering estimate; builtin fonts expose no metrics.
const AVG_CHAR_WIDTH_EM: f32 = 0.5;

fn mm(value: f32) -> Mm {
    Mm(value.into())
}

/// `printpdf`-backed certificate renderer.
pub struct PrintpdfCertificateRenderer {
    /// Organization printed on the signature line.
    organization: String,
}

impl PrintpdfCertificateRenderer {
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
        }
    }

    /// The text lines of the certificate body, in render order:
    /// `(text, font_size_pt, y_mm, emphasized)`.
    fn body_lines(&self, certificate: &Certificate) -> Vec<(String, f32, f32, bool)> {
        vec![
            ("CERTIFICADO DE PARTICIPAÇÃO".to_string(), 28.0, 240.0, true),
            ("Certificamos que".to_string(), 16.0, 215.0, false),
            (certificate.recipient_name().to_string(), 24.0, 200.0, true),
            (
                "concluiu o Teste Lógico Recreativo, obtendo a seguinte pontuação:".to_string(),
                14.0,
                185.0,
                false,
            ),
            (format!("{} pontos", certificate.score()), 36.0, 163.0, true),
            (
                format!("Emitido em: {}", certificate.issued_on_display()),
                12.0,
                143.0,
                false,
            ),
            (
                "______________________________".to_string(),
                12.0,
                118.0,
                false,
            ),
            (
                format!("Coordenação – {}", self.organization),
                12.0,
                110.0,
                false,
            ),
        ]
    }

    /// Approximate x position (mm) that centers `text` on the page.
    fn centered_x(text: &str, font_size_pt: f32) -> f32 {
        let width_mm = text.chars().count() as f32 * font_size_pt * AVG_CHAR_WIDTH_EM * PT_TO_MM;
        ((PAGE_WIDTH_MM - width_mm) / 2.0).max(BORDER_MARGIN_MM)
    }

    fn accent_color() -> Color {
        // #0a66c2
        Color::Rgb(Rgb::new(10.0 / 255.0, 102.0 / 255.0, 194.0 / 255.0, None))
    }

    fn body_color() -> Color {
        Color::Rgb(Rgb::new(0.13, 0.13, 0.13, None))
    }
}

#[async_trait]
impl CertificateRenderer for PrintpdfCertificateRenderer {
    async fn render(&self, certificate: &Certificate) -> Result<Vec<u8>, RenderError> {
        let (doc, page, layer) = PdfDocument::new(
            "Certificado",
            mm(PAGE_WIDTH_MM),
            mm(PAGE_HEIGHT_MM),
            "certificate",
        );
        let layer = doc.get_page(page).get_layer(layer);

        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::font_unavailable(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::font_unavailable(e.to_string()))?;

        // Border frame
        let frame = Line {
            points: vec![
                (
                    Point::new(mm(BORDER_MARGIN_MM), mm(BORDER_MARGIN_MM)),
                    false,
                ),
                (
                    Point::new(mm(PAGE_WIDTH_MM - BORDER_MARGIN_MM), mm(BORDER_MARGIN_MM)),
                    false,
                ),
                (
                    Point::new(
                        mm(PAGE_WIDTH_MM - BORDER_MARGIN_MM),
                        mm(PAGE_HEIGHT_MM - BORDER_MARGIN_MM),
                    ),
                    false,
                ),
                (
                    Point::new(mm(BORDER_MARGIN_MM), mm(PAGE_HEIGHT_MM - BORDER_MARGIN_MM)),
                    false,
                ),
            ],
            is_closed: true,
        };
        layer.set_outline_color(Self::accent_color());
        layer.set_outline_thickness(4.0);
        layer.add_line(frame);

        for (text, font_size, y_mm, emphasized) in self.body_lines(certificate) {
            let font = if emphasized { &bold } else { &regular };
            let color = if emphasized {
                Self::accent_color()
            } else {
                Self::body_color()
            };
            layer.set_fill_color(color);
            let x = Self::centered_x(&text, font_size);
            layer.use_text(text, font_size.into(), mm(x), mm(y_mm), font);
        }

        doc.save_to_bytes()
            .map_err(|e| RenderError::rendering_failed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_certificate() -> Certificate {
        Certificate::new("Ana", 3, NaiveDate::from_ymd_opt(2026, 3, 9).unwrap())
    }

    fn renderer() -> PrintpdfCertificateRenderer {
        PrintpdfCertificateRenderer::new("SaberDigital")
    }

    #[test]
    fn body_lines_contain_name_score_and_date() {
        let lines = renderer().body_lines(&test_certificate());
        let texts: Vec<&str> = lines.iter().map(|(t, _, _, _)| t.as_str()).collect();

        assert!(texts.contains(&"Ana"));
        assert!(texts.contains(&"3 pontos"));
        assert!(texts.iter().any(|t| t.contains("09/03/2026")));
        assert!(texts.iter().any(|t| t.contains("SaberDigital")));
        assert!(texts.iter().any(|t| t.contains("CERTIFICADO")));
    }

    #[test]
    fn body_lines_are_ordered_top_to_bottom() {
        let lines = renderer().body_lines(&test_certificate());
        let ys: Vec<f32> = lines.iter().map(|(_, _, y, _)| *y).collect();
        assert!(ys.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn centered_x_never_crosses_the_border() {
        let very_long = "x".repeat(400);
        let x = PrintpdfCertificateRenderer::centered_x(&very_long, 36.0);
        assert!(x >= BORDER_MARGIN_MM);

        let short = PrintpdfCertificateRenderer::centered_x("Ana", 24.0);
        assert!(short > BORDER_MARGIN_MM);
        assert!(short < PAGE_WIDTH_MM / 2.0);
    }

    #[tokio::test]
    async fn render_produces_pdf_bytes() {
        let bytes = renderer().render(&test_certificate()).await.unwrap();

        assert!(bytes.len() > 500);
        assert_eq!(&bytes[0..5], b"%PDF-");
    }

    #[tokio::test]
    async fn render_is_deterministic_in_size() {
        let renderer = renderer();
        let first = renderer.render(&test_certificate()).await.unwrap();
        let second = renderer.render(&test_certificate()).await.unwrap();

        // Document metadata embeds a fixed-width creation timestamp, so
        // equivalent renders produce equally sized documents.
        assert_eq!(first.len(), second.len());
    }
}
