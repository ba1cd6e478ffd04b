// src/services/document_service.rs

use std::path::PathBuf;

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;

use crate::{
    common::error::AppError,
    db::EmployeeRepository,
    models::employee::{AssignmentState, Employee},
};

const FONT_FAMILY: &str = "Roboto";

#[derive(Clone)]
pub struct DocumentService {
    employee_repo: EmployeeRepository,
    fonts_dir: PathBuf,
}

impl DocumentService {
    pub fn new(employee_repo: EmployeeRepository, fonts_dir: PathBuf) -> Self {
        Self { employee_repo, fonts_dir }
    }

    /// Crachá em PDF com o QR Code do código de barras do funcionário.
    pub async fn employee_badge_pdf(&self, detail_id: i32) -> Result<Vec<u8>, AppError> {
        let employee: Employee = self
            .employee_repo
            .find_row_by_detail(detail_id)
            .await?
            .map(Employee::from)
            .ok_or(AppError::NotFound("employee"))?;

        let barcode = employee.barcode.clone().ok_or(AppError::BarcodeMissing)?;

        // 1. Fonte (pasta configurável, padrão ./fonts)
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, FONT_FAMILY, None)
            .map_err(|e| {
                AppError::InternalServerError(anyhow::anyhow!(
                    "fonte {} não encontrada em {}: {}",
                    FONT_FAMILY,
                    self.fonts_dir.display(),
                    e
                ))
            })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Badge - {}", employee.name));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(elements::Paragraph::new("EMPLOYEE BADGE")
            .styled(style::Style::new().bold().with_font_size(18)));
        doc.push(elements::Break::new(1.5));

        doc.push(elements::Paragraph::new(employee.name.clone())
            .styled(style::Style::new().bold().with_font_size(14)));
        doc.push(elements::Paragraph::new(format!("National ID: {}", employee.national_id)));
        doc.push(elements::Paragraph::new(format!("Since: {}", employee.start_date.format("%d/%m/%Y"))));

        match &employee.assignment {
            AssignmentState::Assigned(view) => {
                doc.push(elements::Paragraph::new(format!(
                    "{} / {}",
                    view.department_name, view.section_name
                )));
                doc.push(elements::Paragraph::new(view.designation_name.clone())
                    .styled(style::Style::new().italic()));
            }
            AssignmentState::Unassigned => {
                doc.push(elements::Paragraph::new("Unassigned")
                    .styled(style::Style::new().italic()));
            }
        }

        doc.push(elements::Break::new(2));

        // --- QR CODE ---
        let code = QrCode::new(barcode.as_bytes())
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        let image_buffer = code.render::<Luma<u8>>().build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

        let pdf_image = elements::Image::from_dynamic_image(dynamic_image)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
            .with_scale(genpdf::Scale::new(0.5, 0.5));
        doc.push(pdf_image);

        let mut code_label = elements::Paragraph::new(barcode);
        code_label.set_alignment(genpdf::Alignment::Center);
        doc.push(code_label.styled(style::Style::new().with_font_size(10)));

        // Renderiza em memória
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        tracing::info!("🪪 Crachá gerado para o funcionário {}", detail_id);
        Ok(buffer)
    }
}
