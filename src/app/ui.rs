use super::PngUploader;
use crate::upload::UploadStatus;
use crate::utils::format_size;
use eframe::egui::{self, Align, Color32, RichText, Sense, Shape, Stroke};

const ACCENT: Color32 = Color32::from_rgb(161, 89, 225);
const SUCCESS: Color32 = Color32::from_rgb(0, 180, 0);
const FAILURE: Color32 = Color32::from_rgb(220, 50, 50);
const MUTED: Color32 = Color32::from_rgb(150, 150, 150);

const DROP_ZONE_HEIGHT: f32 = 240.0;

impl PngUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        let drag_active = ctx.input(|i| !i.raw.hovered_files.is_empty());

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.heading("PNG Uploader");
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new("Drop images to upload them straight to storage")
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });

                ui.add_space(20.0);
                self.render_drop_zone(ui, drag_active);

                if !self.state.rejections.is_empty() {
                    ui.add_space(10.0);
                    self.render_rejections(ui);
                }

                if !self.state.items.is_empty() {
                    ui.add_space(20.0);
                    self.render_file_list(ui);
                }

                ui.add_space(20.0);
                self.render_actions(ui);
                ui.add_space(20.0);
            });
        });
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui, drag_active: bool) {
        let size = egui::vec2(ui.available_width(), DROP_ZONE_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        let painter = ui.painter_at(rect);
        if drag_active || response.hovered() {
            painter.rect_filled(rect, 6.0, ACCENT.gamma_multiply(0.15));
        }

        let border = rect.shrink(1.0);
        let corners = [
            border.left_top(),
            border.right_top(),
            border.right_bottom(),
            border.left_bottom(),
            border.left_top(),
        ];
        let stroke_color = if drag_active {
            ACCENT
        } else {
            ui.visuals().widgets.noninteractive.fg_stroke.color
        };
        painter.extend(Shape::dashed_line(
            &corners,
            Stroke::new(1.0, stroke_color),
            6.0,
            4.0,
        ));

        let text_color = ui.visuals().text_color();
        painter.text(
            rect.center() - egui::vec2(0.0, 30.0),
            egui::Align2::CENTER_CENTER,
            "📦",
            egui::FontId::proportional(40.0),
            text_color,
        );
        painter.text(
            rect.center() + egui::vec2(0.0, 15.0),
            egui::Align2::CENTER_CENTER,
            "Drop your files here",
            egui::FontId::proportional(16.0),
            text_color,
        );
        painter.text(
            rect.center() + egui::vec2(0.0, 38.0),
            egui::Align2::CENTER_CENTER,
            format!("PNG files up to {} only", format_size(self.max_file_size)),
            egui::FontId::proportional(12.0),
            text_color.gamma_multiply(0.7),
        );

        if response
            .on_hover_cursor(egui::CursorIcon::PointingHand)
            .clicked()
        {
            self.pick_files();
        }
    }

    fn render_rejections(&self, ui: &mut egui::Ui) {
        for rejection in &self.state.rejections {
            ui.horizontal(|ui| {
                ui.label("⚠");
                ui.colored_label(FAILURE, rejection.to_string());
            });
        }
    }

    fn render_file_list(&mut self, ui: &mut egui::Ui) {
        let mut remove = None;

        egui::Frame::none()
            .fill(ui.style().visuals.extreme_bg_color)
            .inner_margin(8.0)
            .show(ui, |ui| {
                for (index, item) in self.state.items.iter().enumerate() {
                    ui.horizontal(|ui| {
                        let (icon, label, color) = match item.status {
                            UploadStatus::Pending => ("⏳", "Pending", MUTED),
                            UploadStatus::Success => ("✅", "Uploaded", SUCCESS),
                            UploadStatus::Failed => ("❌", "Failed", FAILURE),
                        };
                        ui.label(icon);
                        ui.label(&item.file.name);
                        ui.label(
                            RichText::new(format_size(item.file.size()))
                                .small()
                                .color(MUTED),
                        );

                        ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                            let remove_button = egui::Button::new("🗑");
                            if ui
                                .add_enabled(!self.state.is_loading, remove_button)
                                .on_hover_text("Remove")
                                .clicked()
                            {
                                remove = Some(index);
                            }
                            ui.colored_label(color, label);
                        });
                    });

                    let progress_bar = egui::ProgressBar::new(f32::from(item.progress) / 100.0)
                        .show_percentage()
                        .animate(false)
                        .fill(match item.status {
                            UploadStatus::Failed => FAILURE,
                            _ => ACCENT,
                        });
                    ui.add(progress_bar);
                    ui.add_space(6.0);
                }
            });

        if let Some(index) = remove {
            self.remove_file(index);
        }
    }

    fn render_actions(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            let upload_button = if self.state.is_loading {
                egui::Button::new("⏳ Uploading...")
            } else {
                egui::Button::new("📤 Upload")
            }
            .min_size(egui::vec2(200.0, 40.0));

            if ui
                .add_enabled(self.state.can_upload(), upload_button)
                .clicked()
            {
                self.start_upload(ui.ctx());
            }

            ui.add_space(5.0);
            if ui
                .add_enabled(self.state.can_modify(), egui::Button::new("🗑 Clear All"))
                .clicked()
            {
                self.reset();
            }

            let succeeded = self.state.count(UploadStatus::Success);
            let failed = self.state.count(UploadStatus::Failed);
            if succeeded + failed > 0 && !self.state.is_loading {
                ui.add_space(10.0);
                ui.label(format!(
                    "✅ Uploaded: {} | ❌ Failed: {}",
                    succeeded, failed
                ));
            }
        });
    }
}
