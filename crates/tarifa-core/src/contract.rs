//! Contract placeholder assembly and template routing.

use std::collections::BTreeMap;

use serde::Serialize;
use tarifa_model::{CatalogRow, CellValue, ContractForm, ContractOptions, PickupMode, TemplateKind};
use tracing::debug;

use crate::aggregate::aggregate;
use crate::promotion::{ResolvedPromotion, TAIL_OFFSET_MULTIPLIER, offset_month, resolve_shape};
use crate::render::{RenderContext, render_home_clause, render_paragraph};
use crate::selection::SectionState;
use crate::session::Session;

/// Section routed to the home template.
pub const HOME_SECTION: &str = "Hogar";
/// Section whose lines fill `MOVIL`, `ALL` and `CONDICION`.
pub const MOBILE_SECTION: &str = "Movil";

const FILE_NAME_FORBIDDEN: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];
const DEFAULT_FILE_STEM: &str = "Contrato";

const MOBILE_PORTABILITY_TEXT: &str = "¿Autoriza usted mediante esta grabación a Pacífico Cable SPA a solicitar al OAP toda información necesaria para activar el proceso? Necesito que me indique su número telefónico actual, la compañía donante, su RUT y su nombre completo.\n\nLa portabilidad solo aplica al número telefónico. Su compañía actual podría cobrar por servicios pendientes. El cambio se realiza entre 03:00 y 05:00 AM, con posible breve interrupción. En caso de retracto, puede realizarlo hasta las 20:00 horas del día en que se active el servicio.\n";

const HOME_PORTABILITY_TEXT: &str = "¿autoriza usted mediante esta grabación a Pacífico Cable SPA a solicitar al OAP toda información necesaria para activar el proceso? Necesito que me indique su número telefónico actual, la compañía donante, su RUT y su nombre completo.\nLe informo que las llamadas a números internacionales y líneas 700 están bloqueadas, aunque usted puede realizarlas sin costo usando plataformas como Skype, WhatsApp, ZOOM o Meet. En caso de corte de luz o suspensión por no pago, el servicio telefónico quedará inhabilitado.";

const NEW_CUSTOMER_BILLING_TEXT: &str = "En Mundo, nuestros servicios tienen el cobro por mes adelantado con seis ciclos de facturación distintos con fecha de inicio 1, 5, 10, 15, 20 y 25 de cada mes. La primera boleta se emitirá en el ciclo más cercano a la activación de los servicios, con 20 días continuos de plazo para pagar. Si no se paga 5 días después, el servicio se suspende y la reposición cuesta $2.500.";

/// Output of contract assembly: the template to merge into, the file name
/// and the placeholder values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractDocument {
    pub template: TemplateKind,
    pub file_name: String,
    pub fields: BTreeMap<String, String>,
}

impl ContractDocument {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// `<titular>.docx` with path and wildcard characters removed.
pub fn sanitize_file_name(titular: &str) -> String {
    let cleaned: String = titular
        .chars()
        .filter(|c| !FILE_NAME_FORBIDDEN.contains(c))
        .collect();
    let stem = cleaned.trim();
    let stem = if stem.is_empty() { DEFAULT_FILE_STEM } else { stem };
    format!("{stem}.docx")
}

/// Builds the placeholder map for the active section.
pub fn build_contract(session: &Session, form: &ContractForm, options: &ContractOptions) -> ContractDocument {
    let state = session.state();
    let template = if state.active_section.eq_ignore_ascii_case(HOME_SECTION) {
        TemplateKind::Home
    } else {
        TemplateKind::Mobile
    };
    let plan = first_selected_row(session);
    let fields = match template {
        TemplateKind::Home => home_fields(session, form, options, plan),
        TemplateKind::Mobile => mobile_fields(session, form, options, plan),
    };
    let document = ContractDocument {
        template,
        file_name: sanitize_file_name(&form.titular),
        fields,
    };
    debug!(
        template = %document.template,
        section = %state.active_section,
        fields = document.fields.len(),
        "contract assembled"
    );
    document
}

/// Row behind the first selected code of the active subsection.
fn first_selected_row(session: &Session) -> Option<&CatalogRow> {
    let subsection = session.state().active_subsection()?;
    let code = subsection.selection.selected_codes().into_iter().next()?;
    session.catalog().find_by_code(code)
}

fn billing_notice(section: Option<&SectionState>, cycle: &str) -> String {
    let Some(section) = section else {
        return String::new();
    };
    match section.active_subsection.to_lowercase().as_str() {
        "nuevo" => NEW_CUSTOMER_BILLING_TEXT.to_string(),
        "cartera" => format!(
            "Nuestros servicios se facturan por mes adelantado y se acoplan a su actual ciclo de facturación {cycle}. \
             Puede aplicarse un cobro proporcional el día de la activación si corresponde."
        ),
        _ => String::new(),
    }
}

fn pickup_text(form: &ContractForm) -> String {
    match form.pickup {
        PickupMode::Sucursal => format!(
            "En la sucursal seleccionada por usted {}. El retiro y activación de su Sim Card puede realizarlo \
             a partir del día hábil siguiente (24 horas).",
            form.branch
        ),
        PickupMode::Domicilio => format!(
            "La tarjeta SIM será enviada a su dirección {}, en un plazo de 2 a 5 días hábiles, una vez recibida \
             debe activarla siguiendo las indicaciones entregadas junto con su Sim Card. Si tiene dudas o consultas \
             puede realizarlas al 6009100100 o al 442160800 opción móvil. (Activación Opción 5)",
            form.address
        ),
    }
}

fn cell_field(row: Option<&CatalogRow>, value: impl Fn(&CatalogRow) -> String) -> String {
    row.map(value).unwrap_or_default()
}

/// Home plan cells print blank when empty or zero.
fn filled_cell(cell: &CellValue) -> String {
    match cell {
        CellValue::Number(value) if *value == 0.0 => String::new(),
        _ => cell.to_string(),
    }
}

/// `months * multiplier + 1` for any numeric month cell, zero included.
/// Text, blank and out-of-range cells give an empty field.
fn renewal_month_field(cell: &CellValue, multiplier: i64) -> String {
    let months = match cell {
        CellValue::Number(value) => Some(*value),
        CellValue::Text(text) => text.trim().parse::<f64>().ok(),
        CellValue::Empty => None,
    };
    months
        .filter(|months| months.is_finite() && months.abs() < i64::MAX as f64)
        .and_then(|months| offset_month(months.trunc() as i64, multiplier))
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default()
}

fn mobile_fields(
    session: &Session,
    form: &ContractForm,
    options: &ContractOptions,
    plan: Option<&CatalogRow>,
) -> BTreeMap<String, String> {
    let mobile = session.state().section_ignore_case(MOBILE_SECTION);

    // Every line of every subsection, primary first, in index order.
    let mut paragraphs = Vec::new();
    let mut resolved: Vec<ResolvedPromotion> = Vec::new();
    let mut any_portability = false;
    for subsection in mobile.map(|s| s.subsections.as_slice()).unwrap_or_default() {
        for line in subsection.selection.lines() {
            if !line.has_selection() {
                continue;
            }
            any_portability |= line.portability.requested;
            let Some(row) = session.catalog().find_by_code(&line.selected_code) else {
                continue;
            };
            let promo = resolve_shape(row);
            let context = if resolved.is_empty() {
                RenderContext::primary(&form.titular)
            } else {
                RenderContext::additional()
            }
            .with_portability(&line.portability);
            paragraphs.push(render_paragraph(&promo, &context));
            resolved.push(promo);
        }
    }

    let condition = if any_portability {
        MOBILE_PORTABILITY_TEXT.to_string()
    } else {
        " ".to_string()
    };

    let fields = [
        ("NOMBRE", form.titular.clone()),
        ("DIRECCION", form.address.clone()),
        ("SUCURSAL", form.branch.clone()),
        ("PLAN", cell_field(plan, |row| row.plan_name.clone())),
        ("VALOR_PLAN", cell_field(plan, |row| row.list_price.to_string())),
        ("VALOR_PROMO", cell_field(plan, |row| row.promo1_price.to_string())),
        ("VALOR_PROMO2", cell_field(plan, |row| row.promo2_price.to_string())),
        ("DURACION", cell_field(plan, |row| row.promo1_months.to_string())),
        ("CICLO", form.billing_cycle.clone()),
        ("FECHA", form.date.clone()),
        ("MOVIL", paragraphs.join("\n\n")),
        ("CONDICION", condition),
        ("NOC", billing_notice(mobile, &form.billing_cycle)),
        ("OBTEN", pickup_text(form)),
        ("ALL", aggregate(&resolved).summary_sentence()),
        ("EJECUTIVO", options.executive.clone()),
    ];
    fields
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

fn home_fields(
    session: &Session,
    form: &ContractForm,
    options: &ContractOptions,
    plan: Option<&CatalogRow>,
) -> BTreeMap<String, String> {
    let home = session.state().section_ignore_case(HOME_SECTION);

    let portability = home
        .and_then(SectionState::active)
        .and_then(|sub| sub.selection.portability_at(0))
        .filter(|portability| portability.requested);
    let (porta, porta2) = match portability {
        Some(portability) => (
            HOME_PORTABILITY_TEXT.to_string(),
            format!(
                "Portabilidad para el número fijo {} actualmente con la compañía {}.",
                portability.number.trim(),
                portability.donor.trim()
            ),
        ),
        None => (String::new(), String::new()),
    };

    let fields = [
        ("NOMBRE", form.titular.clone()),
        ("PLAN", cell_field(plan, |row| row.plan_name.clone())),
        ("DIRECCION", form.address.clone()),
        ("VALOR", cell_field(plan, |row| filled_cell(&row.list_price))),
        ("PROMO1", cell_field(plan, |row| filled_cell(&row.promo1_price))),
        ("MESES1", cell_field(plan, |row| filled_cell(&row.promo1_months))),
        (
            "MESES1-1",
            cell_field(plan, |row| renewal_month_field(&row.promo1_months, 1)),
        ),
        (
            "MESES2+1",
            cell_field(plan, |row| {
                renewal_month_field(&row.promo2_months, TAIL_OFFSET_MULTIPLIER)
            }),
        ),
        ("PROMO2", cell_field(plan, |row| filled_cell(&row.promo2_price))),
        ("MESES2", cell_field(plan, |row| filled_cell(&row.promo2_months))),
        ("DETALLES", cell_field(plan, |row| row.details.clone())),
        ("FECHA", form.date.clone()),
        ("EJECUTIVO", options.executive.clone()),
        ("PORTA", porta),
        ("PORTA2", porta2),
        ("NOC", billing_notice(home, &form.billing_cycle)),
        ("Hogar", plan.map(|row| render_home_clause(&resolve_shape(row))).unwrap_or_default()),
    ];
    fields
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}
