//! Guarantee letter template. Needs only the client name.

use crate::config::DocumentConfig;
use crate::documents::geometry::CM;
use crate::documents::model::{
    Anchor, AssetSlot, ContentNode, DecorationKind, HeadingLevel, MarkerStyle, PageDecoration,
    ParagraphStyle, RichText, Rgb, SignatureBlock,
};

const SIGNATURE_LINE_WIDTH: f32 = 12.0 * CM;

const PURPOSES: [&str; 3] = [
    "Tutelare il cliente in caso di eventi imprevisti",
    "Assicurare la corretta gestione del credito",
    "Garantire la continuità del piano di rimborso",
];

const BENEFITS: [&str; 3] = [
    "Condizioni trasparenti e documentate",
    "Nessun costo aggiuntivo rispetto al Documento di Sintesi",
    "Assistenza presso qualsiasi filiale",
];

pub(super) fn build(config: &DocumentConfig, client_name: &str) -> Vec<ContentNode> {
    let institution = &config.institution;

    vec![
        ContentNode::PageDecoration(PageDecoration {
            kind: DecorationKind::Logo {
                width: 3.5 * CM,
                height: 3.5 * CM,
            },
            position: Anchor::FrameTopLeft,
        }),
        ContentNode::heading(institution.name.as_str(), HeadingLevel::Letterhead),
        ContentNode::heading(institution.office.as_str(), HeadingLevel::Subheading),
        ContentNode::spacer(8.0),
        ContentNode::paragraph(
            RichText::new()
                .bold("Oggetto:")
                .text(" Conferma della garanzia sul finanziamento"),
        ),
        ContentNode::spacer(10.0),
        ContentNode::paragraph(RichText::plain("Gentile Cliente, ").bold(client_name)),
        ContentNode::spacer(8.0),
        ContentNode::paragraph(
            "Con la presente Le confermiamo che il finanziamento da Lei richiesto è assistito \
             da una garanzia, come previsto dalle condizioni contrattuali sottoscritte.",
        ),
        ContentNode::spacer(2.0),
        ContentNode::paragraph(
            RichText::plain(
                "La garanzia è inclusa nelle condizioni indicate nel Documento di Sintesi e ",
            )
            .bold("non richiede alcun pagamento anticipato")
            .text(" né versamenti a soggetti terzi."),
        ),
        ContentNode::spacer(8.0),
        ContentNode::paragraph(RichText::new().bold("Finalità della garanzia:")),
        ContentNode::bullets(PURPOSES, MarkerStyle::Bullet),
        ContentNode::spacer(8.0),
        ContentNode::paragraph(RichText::new().bold(format!("Vantaggi di {}:", institution.short_name))),
        ContentNode::bullets(BENEFITS, MarkerStyle::Check),
        ContentNode::spacer(8.0),
        ContentNode::paragraph(
            "Per ulteriori chiarimenti può rivolgersi alla Sua filiale di riferimento.",
        ),
        ContentNode::spacer(10.0),
        ContentNode::paragraph(
            RichText::plain("Cordiali saluti,")
                .line_break()
                .text(institution.name.as_str()),
        ),
        ContentNode::spacer(10.0),
        ContentNode::styled(
            RichText::new().bold("P.S. ").colored(
                "Nessun dipendente della banca Le chiederà mai di effettuare pagamenti \
                 per ottenere l'erogazione del finanziamento.",
                Rgb::GREY,
            ),
            ParagraphStyle::Note,
        ),
        ContentNode::spacer(16.0 + 1.0 * CM),
        ContentNode::SignatureBlock(SignatureBlock::signed(
            institution.office.as_str(),
            SIGNATURE_LINE_WIDTH,
            AssetSlot::AuthorizedSignature,
            4.0 * CM,
            2.0 * CM,
        )),
    ]
}
