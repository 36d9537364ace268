use actix_multipart::Multipart;
use actix_web::error::ErrorInternalServerError;
use actix_web::http::header::ContentType;
use actix_web::{web, Error, HttpResponse};
use futures_util::{StreamExt, TryStreamExt};

use super::page::{InputMode, PageView, Templates};
use crate::reviews::{Analyzer, InputSource};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)))
        .service(web::resource("/analyze").route(web::post().to(analyze)))
        .service(web::resource("/health").route(web::get().to(health)));
}

/// Fields posted by the analyze form.
#[derive(Debug, Default)]
struct AnalyzeForm {
    mode: InputMode,
    reviews: String,
    file: Vec<u8>,
}

impl AnalyzeForm {
    async fn read(mut payload: Multipart) -> Result<Self, Error> {
        let mut form = AnalyzeForm::default();

        while let Some(mut field) = payload.try_next().await? {
            let name = field.name().unwrap_or_default().to_string();
            let mut data = Vec::new();
            while let Some(chunk) = field.next().await {
                data.extend_from_slice(&chunk?);
            }

            match name.as_str() {
                "mode" => form.mode = InputMode::from_form_value(&String::from_utf8_lossy(&data)),
                "reviews" => form.reviews = String::from_utf8_lossy(&data).into_owned(),
                "file" => form.file = data,
                other => tracing::debug!(field = other, "ignoring unknown form field"),
            }
        }

        Ok(form)
    }

    fn source(&self) -> InputSource {
        match self.mode {
            InputMode::Text => InputSource::Text(self.reviews.clone()),
            InputMode::Csv if self.file.is_empty() => InputSource::NoUpload,
            InputMode::Csv => InputSource::Csv(self.file.clone()),
        }
    }
}

async fn index(templates: web::Data<Templates>) -> Result<HttpResponse, Error> {
    render(&templates, &PageView::idle())
}

async fn analyze(
    analyzer: web::Data<Analyzer>,
    templates: web::Data<Templates>,
    payload: Multipart,
) -> Result<HttpResponse, Error> {
    let form = AnalyzeForm::read(payload).await?;
    let mut page = PageView::with_input(form.mode, form.reviews.clone());

    let reviews = match form.source().collect() {
        Ok(reviews) => reviews,
        Err(err) => {
            tracing::warn!(error = %err, "rejected uploaded file");
            page.reject_input(&err);
            Vec::new()
        }
    };

    let analyzer = analyzer.into_inner();
    let outcome = web::block(move || analyzer.on_analyze_requested(&reviews)).await?;
    page.apply_outcome(outcome).map_err(ErrorInternalServerError)?;

    render(&templates, &page)
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

fn render(templates: &Templates, page: &PageView) -> Result<HttpResponse, Error> {
    let html = templates.render(page).map_err(|e| {
        tracing::error!(error = %e, "failed to render page");
        ErrorInternalServerError(e)
    })?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
}
