//! Server-rendered pages. Every interpolated value goes through [`escape`].

use crate::certificate::{CertificateForm, CertificateRecord, export::Theme};
use crate::entities::certificate;
use crate::utils::html::escape;

const BASE_STYLE: &str = r#"
body { margin: 0; font-family: Helvetica, Arial, sans-serif; background: #f3f4f6; color: #111827; }
main { max-width: 960px; margin: 0 auto; padding: 32px 16px; }
.card { background: #fff; border-radius: 12px; box-shadow: 0 10px 30px rgba(0,0,0,.08); padding: 32px; }
label { display: block; margin-top: 16px; font-weight: 600; }
input { width: 100%; box-sizing: border-box; padding: 10px; border: 1px solid #c4b5fd; border-radius: 6px; }
button, .button { display: inline-block; margin-top: 16px; padding: 10px 18px; border: 0; border-radius: 999px; color: #fff; text-decoration: none; cursor: pointer; }
.error { color: #dc2626; }
.muted { color: #4b5563; }
"#;

fn layout(title: &str, accent: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{BASE_STYLE} button, .button {{ background: {accent}; }}</style>
</head>
<body>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        accent = escape(accent),
    )
}

/// Registration form with a signature pad that fills the hidden `signature`
/// field with a PNG data URI once something has been drawn.
pub fn form_page(
    theme: &Theme,
    organization: &str,
    values: &CertificateForm,
    error: Option<&str>,
) -> String {
    let inputs = [
        ("registrationNumber", "Registration Number", "text", &values.registration_number),
        ("fullName", "Full Name", "text", &values.full_name),
        ("emailAddress", "Email Address", "email", &values.email_address),
        ("courseCompleted", "Course Completed", "text", &values.course_completed),
        ("levelCompleted", "Level Completed (1-5)", "number", &values.level_completed),
    ]
    .iter()
    .map(|(name, label, kind, value)| {
        format!(
            r#"<label for="{name}">{label}</label>
<input id="{name}" name="{name}" type="{kind}" value="{value}" placeholder="Enter your {placeholder}" required>"#,
            value = escape(value),
            placeholder = label.to_lowercase(),
        )
    })
    .collect::<Vec<_>>()
    .join("\n");

    let error = error
        .map(|message| format!(r#"<p class="error">{}</p>"#, escape(message)))
        .unwrap_or_default();

    let body = format!(
        r##"<div class="card">
<h1>{organization}</h1>
<p class="muted">Fill out the form to generate your personalized certificate.</p>
<form method="post" action="/certificates/generate" id="certificate-form">
<h2>Registration Form</h2>
{inputs}
<label>Draw Your Signature</label>
<canvas id="signature-pad" width="400" height="100" style="border:1px solid #7c3aed;border-radius:6px;background:#fff;touch-action:none"></canvas>
<div><a href="#" id="clear-signature">Clear Signature</a></div>
<input type="hidden" name="signature" id="signature">
<button type="submit">Generate Certificate</button>
{error}
</form>
</div>
<script>
(function () {{
  const canvas = document.getElementById('signature-pad');
  const ctx = canvas.getContext('2d');
  let drawing = false, drawn = false;
  const point = (e) => {{ const r = canvas.getBoundingClientRect(); return [e.clientX - r.left, e.clientY - r.top]; }};
  canvas.addEventListener('pointerdown', (e) => {{ drawing = true; drawn = true; ctx.beginPath(); ctx.moveTo(...point(e)); }});
  canvas.addEventListener('pointermove', (e) => {{ if (drawing) {{ ctx.lineTo(...point(e)); ctx.stroke(); }} }});
  window.addEventListener('pointerup', () => {{ drawing = false; }});
  document.getElementById('clear-signature').addEventListener('click', (e) => {{
    e.preventDefault(); ctx.clearRect(0, 0, canvas.width, canvas.height); drawn = false;
  }});
  document.getElementById('certificate-form').addEventListener('submit', () => {{
    document.getElementById('signature').value = drawn ? canvas.toDataURL('image/png') : '';
  }});
}})();
</script>"##,
        organization = escape(organization),
    );

    layout("Generate Certificate", &theme.accent, &body)
}

pub fn not_found_page(theme: &Theme) -> String {
    layout(
        "Certificate Not Found",
        &theme.accent,
        r#"<div class="card" style="text-align:center">
<h1>Certificate Not Found</h1>
<p class="muted">Invalid or missing certificate data.</p>
</div>"#,
    )
}

/// Certificate view with download, print, share and verify actions.
/// `query` is the record's transport encoding, reused for the export links.
pub fn certificate_page(
    record: &CertificateRecord,
    theme: &Theme,
    organization: &str,
    query: &str,
    qr_svg: Option<&str>,
    qr_size: u32,
) -> String {
    let signature = if crate::certificate::signature::is_usable(&record.signature) {
        format!(
            r#"<img src="{}" alt="Signature" width="240" height="60">"#,
            escape(&record.signature)
        )
    } else {
        String::new()
    };

    // The QR area stays blank when encoding failed
    let qr = qr_svg
        .map(|svg| {
            format!(
                r#"<img src="{}" alt="Verification QR code" width="{qr_size}" height="{qr_size}">"#,
                crate::certificate::qr::svg_data_uri(svg)
            )
        })
        .unwrap_or_else(|| {
            format!(r#"<div style="width:{qr_size}px;height:{qr_size}px"></div>"#)
        });

    let download_href = format!("/certificate/download?{query}");
    let print_href = format!("/certificate/print?{query}");
    let verify_href = format!(
        "/verify?reg={}",
        urlencoding::encode(&record.registration_number)
    );
    let file_name = crate::certificate::export::file_name(record);
    let share_text = format!("I've completed {}!", record.course_completed);

    let body = format!(
        r#"<div class="card" id="certificate" style="border:6px solid {accent}">
<p class="muted" style="text-align:center">{organization}</p>
<h1 style="text-align:center;color:{accent}">Certificate of Achievement</h1>
<p style="text-align:center" class="muted">This certifies that</p>
<h2 style="text-align:center">{full_name}</h2>
<p style="text-align:center">has successfully completed <strong>{course}</strong> (Level {level})</p>
<p style="text-align:center" class="muted">Registration No. {registration} &middot; {email}</p>
<div style="display:flex;justify-content:space-between;align-items:flex-end;margin-top:32px">
<div>{signature}<div class="muted">Signature</div></div>
<div style="text-align:center"><div>Issued {date}</div><div>Valid until {expiry}</div></div>
<div>{qr}</div>
</div>
<p class="muted" style="text-align:center;font-family:monospace">Certificate ID {id}</p>
</div>
<div>
<a class="button" id="download" href="{download_href}" download="{file_name}">Download</a>
<a class="button" href="{print_href}" target="_blank" rel="noopener">Print</a>
<button type="button" id="share" data-href="{download_href}" data-file-name="{file_name}" data-text="{share_text}">Share</button>
<a class="button" href="{verify_href}">Verify</a>
</div>
<script>
document.getElementById('download').addEventListener('click', async (e) => {{
  e.preventDefault();
  const link = e.currentTarget;
  try {{
    const response = await fetch(link.href);
    if (!response.ok) throw new Error('Could not generate image');
    const url = URL.createObjectURL(await response.blob());
    const save = document.createElement('a');
    save.href = url;
    save.download = link.getAttribute('download');
    document.body.appendChild(save);
    save.click();
    save.remove();
    URL.revokeObjectURL(url);
  }} catch (err) {{
    console.error('Download failed', err);
    alert('Failed to download the certificate.');
  }}
}});
document.getElementById('share').addEventListener('click', async (e) => {{
  const button = e.currentTarget;
  button.disabled = true;
  try {{
    const response = await fetch(button.dataset.href);
    if (!response.ok) throw new Error('Could not generate image');
    const blob = await response.blob();
    const file = new File([blob], button.dataset.fileName, {{ type: blob.type }});
    if (navigator.canShare && navigator.canShare({{ files: [file] }})) {{
      await navigator.share({{ title: 'Certificate of Achievement', text: button.dataset.text, files: [file] }});
    }} else {{
      alert('Sharing not supported. Please download and share manually.');
    }}
  }} catch (err) {{
    console.error('Share failed', err);
    alert('Unable to share the certificate.');
  }} finally {{
    button.disabled = false;
  }}
}});
</script>"#,
        accent = escape(&theme.accent),
        organization = escape(organization),
        full_name = escape(&record.full_name),
        course = escape(&record.course_completed),
        level = escape(&record.level_completed),
        registration = escape(&record.registration_number),
        email = escape(&record.email_address),
        date = escape(&record.date),
        expiry = escape(&record.expiry_date),
        id = escape(&record.id),
        download_href = escape(&download_href),
        print_href = escape(&print_href),
        verify_href = escape(&verify_href),
        file_name = escape(&file_name),
        share_text = escape(&share_text),
    );

    layout("Certificate of Achievement", &theme.accent, &body)
}

/// Print surface: shows the exported image and opens the print dialog once
/// it has loaded, or straight away if it already has.
pub fn print_page(image_data_uri: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>Print Certificate</title>
<style>body {{ margin: 0; }}</style>
</head>
<body>
<img id="print-image" src="{src}" style="width:100%;">
<script>
(function () {{
  const img = document.getElementById('print-image');
  const print = () => {{ window.focus(); window.print(); }};
  if (img && !img.complete) {{
    img.onload = print;
  }} else {{
    print();
  }}
}})();
</script>
</body>
</html>
"#,
        src = escape(image_data_uri),
    )
}

pub enum VerifyOutcome<'a> {
    MissingRegistration,
    NotFound(&'a str),
    Verified(&'a [certificate::Model]),
    Unavailable,
}

pub fn verify_page(theme: &Theme, outcome: VerifyOutcome<'_>) -> String {
    let body = match outcome {
        VerifyOutcome::MissingRegistration => r#"<div class="card">
<h1>Verification</h1>
<p class="error">A registration number is required.</p>
</div>"#
            .to_string(),
        VerifyOutcome::Unavailable => r#"<div class="card">
<h1>Verification unavailable</h1>
<p class="error">Certificates cannot be checked right now. Please try again later.</p>
</div>"#
            .to_string(),
        VerifyOutcome::NotFound(registration) => format!(
            r#"<div class="card">
<h1>No certificate found</h1>
<p class="muted">No certificate has been recorded for registration number {}.</p>
</div>"#,
            escape(registration)
        ),
        VerifyOutcome::Verified(certificates) => {
            let rows = certificates
                .iter()
                .map(|c| {
                    format!(
                        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                        escape(&c.full_name),
                        escape(&c.course),
                        escape(&c.level),
                        escape(&c.date),
                        escape(&c.expiry_date),
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                r#"<div class="card">
<h1>Certificate Verified</h1>
<table>
<thead><tr><th>Holder</th><th>Course</th><th>Level</th><th>Issued</th><th>Valid until</th></tr></thead>
<tbody>
{rows}
</tbody>
</table>
</div>"#
            )
        }
    };

    layout("Certificate Verification", &theme.accent, &body)
}
