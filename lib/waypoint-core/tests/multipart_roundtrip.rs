//! Multipart bodies parsed back by an independent `multipart/form-data` parser.

use assert2::{check, let_assert};
use axum::body::Body;
use axum::extract::{FromRequest, Multipart};
use axum::http::{Request, header};
use bytes::Bytes;
use waypoint_core::{FilePart, MimeType, MultipartForm, Parameters, Upload};

const BOUNDARY: &str = "Boundary-0123456789abcdef";

#[derive(Debug)]
struct ParsedPart {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

async fn parse(form: MultipartForm) -> Vec<ParsedPart> {
    let (content_type, body) = form.into_body();
    let request = Request::builder()
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .expect("request");

    let mut multipart = Multipart::from_request(request, &()).await.expect("multipart");
    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("next field") {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(ToString::to_string);
        let content_type = field.content_type().map(ToString::to_string);
        let data = field.bytes().await.expect("field bytes");
        parts.push(ParsedPart {
            name,
            file_name,
            content_type,
            data,
        });
    }
    parts
}

#[tokio::test]
async fn flat_form_round_trips() {
    let file = FilePart::new(
        Bytes::from_static(&[0xFF, 0xD8, 0x00, 0x0D, 0x0A]),
        "photo",
        "x",
        "jpg",
        MimeType::Jpeg,
    );
    let form = MultipartForm::flat("B", &Parameters::new().with("a", 1), file);

    let parts = parse(form).await;

    check!(parts.len() == 2);
    check!(parts[0].name == "a");
    check!(parts[0].file_name.is_none());
    check!(&parts[0].data[..] == b"1");

    check!(parts[1].name == "photo");
    check!(parts[1].file_name.as_deref() == Some("x.jpg"));
    check!(parts[1].content_type.as_deref() == Some("image/jpeg"));
    check!(&parts[1].data[..] == &[0xFF, 0xD8, 0x00, 0x0D, 0x0A]);
}

#[tokio::test]
async fn indexed_form_round_trips() {
    let files = vec![
        FilePart::new(Bytes::from_static(b"first"), "photo", "a", "jpg", MimeType::Jpeg),
        FilePart::new(Bytes::from_static(b"clip"), "video", "c", "mp4", MimeType::Mp4),
        FilePart::new(Bytes::from_static(b"second"), "photo", "b", "jpg", MimeType::Jpeg),
    ];
    let params = vec![
        Parameters::new().with("title", "one"),
        Parameters::new().with("title", "two"),
    ];
    let form = Upload::indexed(BOUNDARY, params, files).into_form();

    let parts = parse(form).await;
    let names: Vec<_> = parts.iter().map(|part| part.name.as_str()).collect();

    check!(names == ["title[0]", "title[1]", "photo[0]", "photo[1]", "video[0]"]);
    check!(&parts[0].data[..] == b"one");
    check!(&parts[1].data[..] == b"two");

    let_assert!(Some(second_photo) = parts.iter().find(|part| part.name == "photo[1]"));
    check!(second_photo.file_name.as_deref() == Some("b.jpg"));
    check!(&second_photo.data[..] == b"second");

    let_assert!(Some(video) = parts.iter().find(|part| part.name == "video[0]"));
    check!(video.content_type.as_deref() == Some("video/mp4"));
}

#[tokio::test]
async fn empty_field_value_round_trips() {
    let file = FilePart::with_file_name(Bytes::new(), "doc", "empty.bin", "application/octet-stream");
    let form = MultipartForm::flat("X", &Parameters::new().with("note", ""), file);

    let parts = parse(form).await;

    check!(parts.len() == 2);
    check!(parts[0].data.is_empty());
    check!(parts[1].data.is_empty());
    check!(parts[1].content_type.as_deref() == Some("application/octet-stream"));
}
