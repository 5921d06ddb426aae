//! Report and mail message catalog
//!
//! Every user-facing string on a report surface goes through [`translate`]
//! so that CSV, PDF and mail wording cannot drift apart. Dates are excluded
//! on purpose: they have one fixed rendering (see [`crate::format`]).

use crate::types::Language;

/// Keys into the message catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    ReportTitle,
    ColumnProductName,
    ColumnPartNumber,
    ColumnLotNumber,
    ColumnExpiryDate,
    ColumnProductType,
    ColumnStatus,
    StatusExpired,
    StatusWarning,
    StatusValid,
    StatusUnknown,
    MailSubject,
    MailBody,
    MailLegend,
}

/// Look up a catalog entry for the given language
pub fn translate(key: MessageKey, language: Language) -> &'static str {
    let (en, fr, ar) = match key {
        MessageKey::ReportTitle => (
            "LotWatch Lots Report",
            "Rapport des lots LotWatch",
            "تقرير الدفعات - LotWatch",
        ),
        MessageKey::ColumnProductName => ("Product Name", "Nom du produit", "اسم المنتج"),
        MessageKey::ColumnPartNumber => ("Part Number", "Numéro de pièce", "رقم القطعة"),
        MessageKey::ColumnLotNumber => ("Lot Number", "Numéro de lot", "رقم الدفعة"),
        MessageKey::ColumnExpiryDate => ("Expiry Date", "Date d'expiration", "تاريخ الانتهاء"),
        MessageKey::ColumnProductType => ("Product Type", "Type de produit", "نوع المنتج"),
        MessageKey::ColumnStatus => ("Status", "Statut", "الحالة"),
        MessageKey::StatusExpired => ("Expired", "Expiré", "منتهي الصلاحية"),
        MessageKey::StatusWarning => ("Expiring Soon", "Expire bientôt", "ينتهي قريباً"),
        MessageKey::StatusValid => ("Valid", "Valide", "صالح"),
        MessageKey::StatusUnknown => ("Unknown", "Inconnu", "غير معروف"),
        MessageKey::MailSubject => (
            "LotWatch monthly lots report",
            "Rapport mensuel des lots LotWatch",
            "تقرير الدفعات الشهري من LotWatch",
        ),
        MessageKey::MailBody => (
            "Please find attached the monthly lots report.",
            "Veuillez trouver ci-joint le rapport mensuel des lots.",
            "تجدون طيه تقرير الدفعات الشهري.",
        ),
        MessageKey::MailLegend => (
            "Status colors: red = expired, yellow = expiring within 30 days, green = valid.",
            "Couleurs des statuts : rouge = expiré, jaune = expire sous 30 jours, vert = valide.",
            "ألوان الحالات: الأحمر = منتهي الصلاحية، الأصفر = ينتهي خلال 30 يوماً، الأخضر = صالح.",
        ),
    };
    match language {
        Language::En => en,
        Language::Fr => fr,
        Language::Ar => ar,
    }
}

/// Report column headers in table order
pub fn column_headers(language: Language) -> [&'static str; 6] {
    [
        translate(MessageKey::ColumnProductName, language),
        translate(MessageKey::ColumnPartNumber, language),
        translate(MessageKey::ColumnLotNumber, language),
        translate(MessageKey::ColumnExpiryDate, language),
        translate(MessageKey::ColumnProductType, language),
        translate(MessageKey::ColumnStatus, language),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KEYS: [MessageKey; 14] = [
        MessageKey::ReportTitle,
        MessageKey::ColumnProductName,
        MessageKey::ColumnPartNumber,
        MessageKey::ColumnLotNumber,
        MessageKey::ColumnExpiryDate,
        MessageKey::ColumnProductType,
        MessageKey::ColumnStatus,
        MessageKey::StatusExpired,
        MessageKey::StatusWarning,
        MessageKey::StatusValid,
        MessageKey::StatusUnknown,
        MessageKey::MailSubject,
        MessageKey::MailBody,
        MessageKey::MailLegend,
    ];

    #[test]
    fn test_every_key_has_every_language() {
        for key in ALL_KEYS {
            for lang in [Language::En, Language::Fr, Language::Ar] {
                assert!(
                    !translate(key, lang).is_empty(),
                    "missing translation for {:?} in {:?}",
                    key,
                    lang
                );
            }
        }
    }

    #[test]
    fn test_arabic_entries_contain_arabic_script() {
        for key in [
            MessageKey::ColumnProductName,
            MessageKey::StatusExpired,
            MessageKey::MailBody,
        ] {
            let text = translate(key, Language::Ar);
            assert!(
                text.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c)),
                "expected Arabic script in {:?}",
                key
            );
        }
    }

    #[test]
    fn test_column_headers_follow_table_order() {
        let headers = column_headers(Language::En);
        assert_eq!(
            headers,
            [
                "Product Name",
                "Part Number",
                "Lot Number",
                "Expiry Date",
                "Product Type",
                "Status"
            ]
        );
    }

    #[test]
    fn test_headers_are_localized() {
        assert_ne!(
            column_headers(Language::En),
            column_headers(Language::Fr)
        );
        assert_ne!(
            column_headers(Language::Fr),
            column_headers(Language::Ar)
        );
    }
}
