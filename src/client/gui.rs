use crate::client::core::{Msg, RequestId};
use crate::client::main::Client;
use crate::client::render::Element;
use crate::uploaded_image::upload::{UploadSource, UploadedImage};
use eframe::egui;
use std::path::PathBuf;

pub struct ClientWindow {
    client: Client,
    path_input: String,
    preview: Option<(RequestId, egui::TextureHandle)>,
}

impl ClientWindow {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            path_input: String::new(),
            preview: None,
        }
    }

    fn preview_texture(
        &mut self,
        ctx: &egui::Context,
        request_id: RequestId,
        image: &UploadedImage,
    ) -> egui::TextureHandle {
        if let Some((cached_id, texture)) = &self.preview {
            if *cached_id == request_id {
                return texture.clone();
            }
        }

        let color_image = egui::ColorImage::from_rgb(
            [image.preview.width as usize, image.preview.height as usize],
            &image.preview.rgb,
        );
        let texture = ctx.load_texture("preview", color_image, egui::TextureOptions::LINEAR);
        self.preview = Some((request_id, texture.clone()));
        texture
    }

    fn show_element(&mut self, ui: &mut egui::Ui, element: &Element, msgs: &mut Vec<Msg>) {
        match element {
            Element::Title(text) => {
                ui.label(egui::RichText::new(text).size(26.0).strong());
            }
            Element::Caption(text) => {
                ui.label(egui::RichText::new(text).weak());
                ui.add_space(8.0);
            }
            Element::Header(text) => {
                ui.heading(text);
            }
            Element::Subheader(text) => {
                ui.add_space(8.0);
                ui.label(egui::RichText::new(text).size(18.0).strong());
            }
            Element::Text(text) => {
                ui.label(text);
            }
            Element::Error(text) => {
                ui.colored_label(ui.visuals().error_fg_color, text);
            }
            Element::Json(text) => {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.label(egui::RichText::new(text).monospace());
                });
            }
            Element::Spinner(text) => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(text);
                });
            }
            Element::BaseUrlInput(url) => {
                ui.label("API base URL");
                let mut value = url.clone();
                if ui.text_edit_singleline(&mut value).changed() {
                    msgs.push(Msg::ApiBaseUrlChanged(value));
                }
            }
            Element::HealthButton { enabled } => {
                if ui
                    .add_enabled(*enabled, egui::Button::new("Check API Health"))
                    .clicked()
                {
                    msgs.push(Msg::HealthCheckRequested);
                }
            }
            Element::FilePicker { label, extensions } => {
                ui.label(format!("{} ({})", label, extensions.join(", ")));
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.path_input)
                            .hint_text("/path/to/leaf.jpg"),
                    );
                    let path = self.path_input.trim();
                    if ui
                        .add_enabled(!path.is_empty(), egui::Button::new("Open"))
                        .clicked()
                    {
                        msgs.push(Msg::UploadSelected(UploadSource::Path(PathBuf::from(path))));
                    }
                });
                ui.label(egui::RichText::new("or drop a file onto this window").weak());
            }
            Element::Preview {
                request_id,
                image,
                caption,
            } => {
                let texture = self.preview_texture(ui.ctx(), *request_id, image);
                ui.add(
                    egui::Image::new(egui::load::SizedTexture::from_handle(&texture))
                        .max_width(ui.available_width()),
                );
                ui.label(egui::RichText::new(caption).weak());
            }
            Element::PredictButton { enabled } => {
                if ui
                    .add_enabled(*enabled, egui::Button::new("Predict"))
                    .clicked()
                {
                    msgs.push(Msg::PredictRequested);
                }
            }
            Element::RawToggle(show_raw) => {
                let mut value = *show_raw;
                if ui.checkbox(&mut value, "Show raw probabilities").changed() {
                    msgs.push(Msg::ShowRawToggled(value));
                }
            }
        }
    }
}

/// Only the last file of a multi-file drop is used.
fn dropped_upload(ctx: &egui::Context) -> Option<UploadSource> {
    let file = ctx.input(|i| i.raw.dropped_files.last().cloned())?;

    match (file.bytes, file.path) {
        (Some(bytes), path) => {
            let filename = if file.name.is_empty() {
                path.map(|p| UploadSource::Path(p).filename())
                    .unwrap_or_default()
            } else {
                file.name
            };
            Some(UploadSource::Bytes {
                filename,
                content_type: Some(file.mime).filter(|mime| !mime.is_empty()),
                bytes,
            })
        }
        (None, Some(path)) => Some(UploadSource::Path(path)),
        (None, None) => None,
    }
}

impl eframe::App for ClientWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.client.poll();

        let mut msgs = vec![];
        if let Some(source) = dropped_upload(ctx) {
            msgs.push(Msg::UploadSelected(source));
        }

        let view = self.client.view();

        egui::SidePanel::left("settings")
            .resizable(true)
            .show(ctx, |ui| {
                for element in &view.sidebar {
                    self.show_element(ui, element, &mut msgs);
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                for element in &view.main {
                    self.show_element(ui, element, &mut msgs);
                }
            });
        });

        for msg in msgs {
            self.client.dispatch(msg);
        }

        if self.client.state.is_busy() {
            ctx.request_repaint_after(self.client.config.poll_rate);
        }
    }
}
