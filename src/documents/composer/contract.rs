//! Loan contract template.

use chrono::NaiveDate;

use crate::config::DocumentConfig;
use crate::documents::common::format_numeric_date;
use crate::documents::finance::{format_currency, format_percent_localized};
use crate::documents::geometry::{CM, FRAME_WIDTH};
use crate::documents::model::{
    Anchor, AssetSlot, ContentNode, DecorationKind, HeadingLevel, MarkerStyle, PageDecoration,
    ParagraphStyle, RichText, SignatureBlock,
};

use super::LoanLetterData;

const SECTION_GAP: f32 = 22.0;

const SPECIAL_CONDITIONS: [&str; 6] = [
    "Pausa pagamenti: possibilità di sospendere fino a 3 rate consecutive.",
    "Estinzione anticipata: senza penali.",
    "Riduzione del TAN: riduzione di 0,10 p.p. ogni 12 rate puntuali (fino a un minimo del 2,80%).",
    "CashBack: rimborso dell'1% su ogni rata versata.",
    "Consulenza finanziaria: accesso gratuito per 12 mesi.",
    "Bonifici SEPA gratuiti: nessun costo per addebiti diretti (SDD).",
];

const PENALTIES: [&str; 4] = [
    "Ritardo superiore a 5 giorni: interessi pari al TAN + 2 p.p.",
    "Spese di sollecito: € 10 (cartaceo) / € 5 (digitale).",
    "Mancato pagamento di 2 rate: avvio della procedura di recupero crediti.",
    "Revoca della polizza: obbligo di ripristino entro 15 giorni.",
];

pub(super) fn build(
    config: &DocumentConfig,
    data: &LoanLetterData<'_>,
    today: NaiveDate,
) -> Vec<ContentNode> {
    let institution = &config.institution;
    let terms = data.terms;

    let parameters = vec![
        format!("Importo richiesto: {}", format_currency(terms.amount)),
        format!(
            "Tasso Annuo Nominale (TAN) fisso: {}%",
            format_percent_localized(terms.tan)
        ),
        format!(
            "Tasso Annuo Effettivo Globale (TAEG): {}%",
            format_percent_localized(terms.taeg)
        ),
        format!("Durata: {} mesi", terms.duration_months),
        format!("Rata mensile: {}", format_currency(terms.monthly_payment)),
        format!(
            "Commissione di incasso rata: {}",
            format_currency(config.installment_fee)
        ),
        format!(
            "Premio assicurativo obbligatorio: {}",
            format_currency(config.insurance_premium)
        ),
    ];

    vec![
        ContentNode::PageDecoration(PageDecoration {
            kind: DecorationKind::Logo {
                width: 3.2 * CM,
                height: 1.7 * CM,
            },
            position: Anchor::TopRight {
                inset_x: 2.5 * CM,
                inset_y: 2.5 * CM,
            },
        }),
        ContentNode::spacer(12.0),
        ContentNode::heading(
            RichText::new().bold_italic(institution.name.as_str()),
            HeadingLevel::Title,
        ),
        ContentNode::spacer(10.0),
        ContentNode::paragraph(
            RichText::plain(institution.legal_address.as_str())
                .line_break()
                .text(institution.registration.as_str()),
        ),
        ContentNode::spacer(20.0),
        ContentNode::styled(
            RichText::new().bold("Cliente: ").bold(data.client_name),
            ParagraphStyle::Emphasis,
        ),
        ContentNode::paragraph(format!(
            "La ringraziamo per aver scelto {} come Suo partner finanziario. \
             Di seguito sono riportate le condizioni principali e gli obblighi relativi al \
             finanziamento concesso. La preghiamo di prenderne visione attentamente prima \
             della firma del contratto.",
            institution.short_name
        )),
        ContentNode::spacer(SECTION_GAP),
        ContentNode::heading("Parametri principali del prestito:", HeadingLevel::Section),
        ContentNode::bullets(parameters, MarkerStyle::Dash),
        ContentNode::spacer(SECTION_GAP),
        ContentNode::heading("Agevolazioni e condizioni speciali:", HeadingLevel::Section),
        ContentNode::numbered(SPECIAL_CONDITIONS),
        ContentNode::spacer(SECTION_GAP),
        ContentNode::heading("Penali e interessi di mora:", HeadingLevel::Section),
        ContentNode::bullets(PENALTIES, MarkerStyle::Dash),
        ContentNode::spacer(SECTION_GAP),
        ContentNode::paragraph(
            "La invitiamo a verificare di aver compreso appieno i Suoi obblighi verso la banca. \
             Per qualsiasi chiarimento, i nostri consulenti sono a Sua disposizione.",
        ),
        ContentNode::spacer(SECTION_GAP + 24.0),
        ContentNode::styled(
            RichText::plain("Cordiali saluti,")
                .line_break()
                .text(institution.name.as_str()),
            ParagraphStyle::Closing,
        ),
        ContentNode::spacer(SECTION_GAP),
        ContentNode::styled(
            format!(
                "Luogo e data: {}, {}",
                data.place,
                format_numeric_date(today)
            ),
            ParagraphStyle::Closing,
        ),
        ContentNode::spacer(36.0),
        ContentNode::SignatureBlock(SignatureBlock::signed(
            format!("Firma del rappresentante {}  ", institution.short_name),
            FRAME_WIDTH,
            AssetSlot::AuthorizedSignature,
            4.0 * CM,
            1.5 * CM,
        )),
        ContentNode::spacer(24.0),
        ContentNode::SignatureBlock(SignatureBlock::blank("Firma del Cliente: ", FRAME_WIDTH)),
        ContentNode::spacer(32.0),
    ]
}
