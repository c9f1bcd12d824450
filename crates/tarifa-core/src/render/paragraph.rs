use tarifa_model::Portability;

use super::{RenderContext, money, month_number};
use crate::promotion::{PromotionShape, ResolvedPromotion};

/// Contract paragraph for one mobile line.
pub fn render_paragraph(promo: &ResolvedPromotion, context: &RenderContext<'_>) -> String {
    let prefix = if context.is_primary {
        format!(
            "Sr./Sra. {}, Confirmamos el {},",
            context.subject_name, promo.plan_name
        )
    } else {
        format!("Confirmamos siguiente plan, el {},", promo.plan_name)
    };
    let list = money(&promo.list_price);
    let promo1 = money(&promo.promo1);
    let promo2 = money(&promo.promo2);
    let months1 = &promo.months1;
    let months2 = &promo.months2;
    let renewal1 = month_number(promo.first_renewal_month());
    let renewal2 = month_number(promo.second_renewal_month());

    let head = format!("{prefix} con valor total de {list}.");
    let paragraph = match promo.shape {
        PromotionShape::NoDiscount => head,
        PromotionShape::SingleDiscountTimed => format!(
            "{head} Al que se aplicará un valor promocional inicial de {promo1} durante {months1} meses. \
             Finalizado este periodo, a partir del mes {renewal1}, se aplicará el valor completo sin descuento: {list}."
        ),
        PromotionShape::SingleDiscountPermanent => format!(
            "{head} Al que se aplicará un valor promocional de {promo1} por vigencia permanente."
        ),
        PromotionShape::DualDiscountTimed => format!(
            "{head} Al que se aplicará un valor promocional inicial de {promo1} durante {months1} meses. \
             A partir del mes {renewal1}, el valor mensual será de {promo2} durante {months2} meses. \
             Finalizado este periodo, a partir del mes {renewal2}, se aplicará el valor completo sin descuento: {list}."
        ),
        PromotionShape::DualDiscountTailPermanent => format!(
            "{head} Al que se aplicará un valor promocional inicial de {promo1} durante {months1} meses. \
             A partir del mes {renewal1}, se aplicará un valor promocional de {promo2} por vigencia permanente."
        ),
        PromotionShape::DualDiscountUnstructured => {
            let first = if months1.is_present() {
                format!(" por {months1} meses")
            } else {
                String::new()
            };
            let second = if months2.is_present() {
                format!(" por {months2} meses")
            } else {
                " (vigencia permanente)".to_string()
            };
            format!("{head} Existen promociones aplicables: {promo1}{first} y luego {promo2}{second}.")
        }
    };

    match context.portability {
        Some(portability) => append_portability(paragraph, portability),
        None => paragraph,
    }
}

/// Adds the portability clause when the line requested portability with both
/// number and donor filled in. A closing period is replaced by the clause;
/// otherwise the clause becomes a new sentence.
pub fn append_portability(mut paragraph: String, portability: &Portability) -> String {
    if !portability.is_complete() {
        return paragraph;
    }
    let number = portability.number.trim();
    let donor = portability.donor.trim();
    if paragraph.ends_with('.') {
        paragraph.pop();
        paragraph.push_str(&format!(
            ", con portabilidad del número {number} desde la compañía {donor}."
        ));
    } else {
        paragraph.push_str(&format!(
            " Con portabilidad del número {number} desde la compañía {donor}."
        ));
    }
    paragraph
}

/// Descriptive clause for the home contract.
pub fn render_home_clause(promo: &ResolvedPromotion) -> String {
    let list = money(&promo.list_price);
    let promo1 = money(&promo.promo1);
    let promo2 = money(&promo.promo2);
    let months1 = &promo.months1;
    let months2 = &promo.months2;
    let renewal1 = month_number(promo.first_renewal_month());
    let renewal2 = month_number(promo.second_renewal_month());

    let head = format!("El valor total del plan es de {list}");
    match promo.shape {
        PromotionShape::NoDiscount => head,
        PromotionShape::SingleDiscountTimed => format!(
            "{head}, al que se aplicará un valor promocional inicial de {promo1} durante {months1} meses. \
             Finalizado este periodo, a partir del mes {renewal1}, se aplicará el valor completo sin descuento: {list}."
        ),
        PromotionShape::SingleDiscountPermanent => format!(
            "{head}, al que se aplicará un valor promocional de {promo1} por vigencia permanente."
        ),
        PromotionShape::DualDiscountTimed => format!(
            "{head}, al que se aplicará un valor promocional inicial de {promo1} durante {months1} meses. \
             A partir del mes {renewal1}, el valor mensual será de {promo2} durante {months2} meses. \
             Finalizado este periodo, a partir del mes {renewal2}, se aplicará el valor completo sin descuento: {list}."
        ),
        PromotionShape::DualDiscountTailPermanent => format!(
            "{head}, al que se aplicará un valor promocional inicial de {promo1} durante {months1} meses. \
             A partir del mes {renewal1}, el valor mensual será de {promo2} por vigencia permanente."
        ),
        PromotionShape::DualDiscountUnstructured => {
            let first = if months1.is_present() {
                format!(" durante {months1} meses")
            } else {
                String::new()
            };
            let second = if months2.is_present() {
                format!(" durante {months2} meses")
            } else {
                " (vigencia permanente)".to_string()
            };
            format!(
                "{head}, al que se aplicarán promociones: {promo1}{first} y {promo2}{second}; \
                 luego aplicará el valor normal {list}."
            )
        }
    }
}
