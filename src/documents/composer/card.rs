//! Card issuance letter template.

use crate::config::DocumentConfig;
use crate::documents::finance::{format_currency, format_percent_localized};
use crate::documents::geometry::{CM, FRAME_WIDTH};
use crate::documents::model::{
    Anchor, AssetSlot, ContentNode, DecorationKind, HeadingLevel, PageDecoration, RichText, Rgb,
    SignatureBlock,
};

use super::LoanLetterData;

const SIGNATURE_LINE_WIDTH: f32 = FRAME_WIDTH;

pub(super) fn build(config: &DocumentConfig, data: &LoanLetterData<'_>) -> Vec<ContentNode> {
    let institution = &config.institution;
    let terms = data.terms;
    let fee = format_currency(config.card_fee);

    let approval = RichText::new()
        .bold(format!("Gentile Cliente {}", data.client_name))
        .line_break()
        .line_break()
        .text("Siamo lieti di informarLa che il Suo prestito è stato ")
        .bold("approvato")
        .text(format!(
            " per un importo di {}, con una durata di {} mesi al tasso annuo nominale (TAN) del {}%.",
            format_currency(terms.amount),
            terms.duration_months,
            format_percent_localized(terms.tan),
        ))
        .line_break()
        .line_break()
        .text(format!(
            "Il Suo pagamento mensile sarà pari a {}.",
            format_currency(terms.monthly_payment)
        ));

    let explanation = RichText::plain(
        "All'erogazione del credito è associata l'apertura di un ",
    )
    .bold("conto di credito")
    .text(format!(
        " con la relativa carta di pagamento. Il canone annuo della carta, pari a {fee}, \
         è addebitato direttamente sul conto di credito secondo quanto indicato nel foglio \
         informativo e non richiede alcun versamento separato."
    ))
    .line_break()
    .line_break()
    .bold("Che cosa comprende il conto di credito?")
    .line_break()
    .text("- il codice IBAN dedicato al finanziamento,")
    .line_break()
    .text("- la produzione e l'invio della carta,")
    .line_break()
    .text("- l'accesso ai servizi clienti,")
    .line_break()
    .text("- la gestione digitale del prestito.")
    .line_break()
    .line_break()
    .text("Rimaniamo a Sua disposizione per ogni assistenza.")
    .line_break()
    .line_break()
    .text("Cordiali saluti,")
    .line_break()
    .text(institution.name.as_str());

    vec![
        ContentNode::PageDecoration(PageDecoration {
            kind: DecorationKind::Border {
                line_width: 4.0,
                color: Rgb::ORANGE,
            },
            position: Anchor::PageInset(1.0 * CM),
        }),
        ContentNode::PageDecoration(PageDecoration {
            kind: DecorationKind::Logo {
                width: 4.0 * CM,
                height: 4.0 * CM,
            },
            position: Anchor::FrameTopLeft,
        }),
        ContentNode::heading(institution.office.as_str(), HeadingLevel::Title),
        ContentNode::spacer(10.0),
        ContentNode::paragraph(
            RichText::new()
                .bold("Oggetto:")
                .text(" Apertura conto di credito ed emissione carta"),
        ),
        ContentNode::spacer(14.0),
        ContentNode::paragraph(approval),
        ContentNode::spacer(8.0),
        ContentNode::paragraph(explanation),
        ContentNode::spacer(24.0 + 1.0 * CM),
        ContentNode::SignatureBlock(SignatureBlock::signed(
            format!("Responsabile {}", institution.office),
            SIGNATURE_LINE_WIDTH,
            AssetSlot::AuthorizedSignature,
            4.0 * CM,
            2.0 * CM,
        )),
    ]
}
