//! Standalone image export of a certificate, used by download, print and share.

use super::{CertificateRecord, qr, signature};
use crate::config::Config;
use crate::utils::html::{escape, sanitize_filename};

pub const EXPORT_WIDTH: u32 = 1123;
pub const EXPORT_HEIGHT: u32 = 794;

/// Color notations image viewers and rasterizers commonly cannot paint.
const WIDE_GAMUT_NOTATIONS: [&str; 5] = ["oklch(", "oklab(", "lab(", "lch(", "color("];

const FALLBACK_COLOR: &str = "#000";

/// Replaces a wide-gamut color value with a plain fallback.
pub fn legacy_color(value: &str) -> &str {
    let lowered = value.trim().to_ascii_lowercase();
    if WIDE_GAMUT_NOTATIONS
        .iter()
        .any(|notation| lowered.contains(notation))
    {
        FALLBACK_COLOR
    } else {
        value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub accent: String,
    pub ink: String,
    pub muted: String,
    pub paper: String,
}

impl Theme {
    pub fn from_config(config: &Config) -> Self {
        Self {
            accent: config.accent_color.clone(),
            ink: "#111827".to_string(),
            muted: "#4b5563".to_string(),
            paper: "#ffffff".to_string(),
        }
    }

    /// The theme with every color passed through [`legacy_color`].
    pub fn for_export(&self) -> Self {
        Self {
            accent: legacy_color(&self.accent).to_string(),
            ink: legacy_color(&self.ink).to_string(),
            muted: legacy_color(&self.muted).to_string(),
            paper: legacy_color(&self.paper).to_string(),
        }
    }
}

/// File name offered for a downloaded or shared certificate.
pub fn file_name(record: &CertificateRecord) -> String {
    format!(
        "certificate-{}.svg",
        sanitize_filename(&record.registration_number)
    )
}

/// Renders the certificate as a self-contained SVG document.
pub fn render_certificate_svg(
    record: &CertificateRecord,
    theme: &Theme,
    organization: &str,
    qr_size: u32,
) -> String {
    let theme = theme.for_export();
    let w = EXPORT_WIDTH;
    let h = EXPORT_HEIGHT;
    let cx = w / 2;

    let signature_image = if signature::is_usable(&record.signature) {
        format!(
            r#"<image x="150" y="560" width="240" height="60" href="{}"/>"#,
            escape(&record.signature)
        )
    } else {
        String::new()
    };

    let qr_image = qr::render_svg_or_blank(&record.qr_code, qr_size)
        .map(|svg| {
            format!(
                r#"<image x="{x}" y="540" width="{qr_size}" height="{qr_size}" href="{href}"/>"#,
                x = w - 150 - qr_size,
                href = qr::svg_data_uri(&svg),
            )
        })
        .unwrap_or_default();

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
<rect width="{w}" height="{h}" fill="{paper}"/>
<rect x="24" y="24" width="{iw}" height="{ih}" fill="none" stroke="{accent}" stroke-width="6"/>
<text x="{cx}" y="120" text-anchor="middle" font-family="Georgia, serif" font-size="26" fill="{muted}">{organization}</text>
<text x="{cx}" y="200" text-anchor="middle" font-family="Georgia, serif" font-size="48" font-weight="bold" fill="{accent}">Certificate of Achievement</text>
<text x="{cx}" y="260" text-anchor="middle" font-family="Helvetica, sans-serif" font-size="20" fill="{muted}">This certifies that</text>
<text x="{cx}" y="330" text-anchor="middle" font-family="Georgia, serif" font-size="44" fill="{ink}">{full_name}</text>
<text x="{cx}" y="390" text-anchor="middle" font-family="Helvetica, sans-serif" font-size="20" fill="{muted}">has successfully completed</text>
<text x="{cx}" y="440" text-anchor="middle" font-family="Helvetica, sans-serif" font-size="28" font-weight="bold" fill="{ink}">{course} (Level {level})</text>
<text x="{cx}" y="490" text-anchor="middle" font-family="Helvetica, sans-serif" font-size="16" fill="{muted}">Registration No. {registration} | {email}</text>
{signature_image}
<line x1="150" y1="630" x2="390" y2="630" stroke="{ink}" stroke-width="1"/>
<text x="270" y="655" text-anchor="middle" font-family="Helvetica, sans-serif" font-size="14" fill="{muted}">Signature</text>
<text x="{cx}" y="610" text-anchor="middle" font-family="Helvetica, sans-serif" font-size="16" fill="{ink}">Issued {date}</text>
<text x="{cx}" y="636" text-anchor="middle" font-family="Helvetica, sans-serif" font-size="16" fill="{ink}">Valid until {expiry}</text>
<text x="{cx}" y="740" text-anchor="middle" font-family="monospace" font-size="12" fill="{muted}">Certificate ID {id}</text>
{qr_image}
</svg>
"#,
        iw = w - 48,
        ih = h - 48,
        paper = theme.paper,
        accent = theme.accent,
        ink = theme.ink,
        muted = theme.muted,
        organization = escape(organization),
        full_name = escape(&record.full_name),
        course = escape(&record.course_completed),
        level = escape(&record.level_completed),
        registration = escape(&record.registration_number),
        email = escape(&record.email_address),
        date = escape(&record.date),
        expiry = escape(&record.expiry_date),
        id = escape(&record.id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::signature::tests::png_data_uri;
    use crate::test_utils::test_config;

    fn record() -> CertificateRecord {
        CertificateRecord {
            id: "7d1c2b7e-0000-4000-8000-000000000001".to_string(),
            date: "3/7/2026".to_string(),
            expiry_date: "3/7/2028".to_string(),
            registration_number: "REG/01".to_string(),
            full_name: "Tom & <Jerry>".to_string(),
            email_address: "tj@example.org".to_string(),
            course_completed: "Cartography".to_string(),
            level_completed: "2".to_string(),
            signature: png_data_uri(),
            qr_code: "https://certs.example.org/verify?reg=REG%2F01".to_string(),
        }
    }

    #[test]
    fn test_legacy_color() {
        assert_eq!(legacy_color("oklch(0.62 0.21 293)"), "#000");
        assert_eq!(legacy_color("LAB(50% 40 59)"), "#000");
        assert_eq!(legacy_color("color(display-p3 1 0 0)"), "#000");
        assert_eq!(legacy_color("#7c3aed"), "#7c3aed");
        assert_eq!(legacy_color("rgb(124, 58, 237)"), "rgb(124, 58, 237)");
    }

    #[test]
    fn test_export_theme_drops_wide_gamut_accent() {
        let mut config = test_config();
        config.accent_color = "oklch(0.55 0.25 290)".to_string();
        let theme = Theme::from_config(&config);

        let svg = render_certificate_svg(&record(), &theme, "Org", 90);
        assert!(!svg.contains("oklch"));
        assert!(svg.contains(r##"stroke="#000""##));
    }

    #[test]
    fn test_svg_escapes_text_and_embeds_images() {
        let theme = Theme::from_config(&test_config());
        let svg = render_certificate_svg(&record(), &theme, "Org", 90);

        assert!(svg.contains("Tom &amp; &lt;Jerry&gt;"));
        assert!(svg.contains("data:image/png;base64,"));
        assert!(svg.contains("data:image/svg+xml;base64,"));
        assert!(svg.starts_with("<svg"));
    }

    #[test]
    fn test_unusable_signature_is_left_out() {
        let mut record = record();
        record.signature = "javascript:alert(1)".to_string();
        let svg = render_certificate_svg(&record, &Theme::from_config(&test_config()), "Org", 90);
        assert!(!svg.contains("javascript:"));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(&record()), "certificate-REG_01.svg");
    }
}
