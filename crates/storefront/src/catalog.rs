//! The single-product catalog snapshot.
//!
//! One gift set, four color variants, one price. This is static data baked
//! into the client; the remote service keeps its own catalog and is the
//! source of truth for totals.

use rust_decimal::Decimal;

use tahadu_core::{CartLine, VariantId};

/// Unit price of the gift set in EGP, identical across variants.
pub const UNIT_PRICE_EGP: i64 = 350;

/// One color variant of the gift set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// SKU code, the cart merge key and the `color` sent to the service.
    pub id: &'static str,
    /// Arabic display name.
    pub name_ar: &'static str,
    /// Swatch color for display.
    pub hex: &'static str,
}

impl Variant {
    /// Snapshot this variant into a cart line.
    #[must_use]
    pub fn to_cart_line(&self, quantity: u32) -> CartLine {
        CartLine {
            product_id: VariantId::from(self.id),
            display_name: self.name_ar.to_owned(),
            unit_price: Decimal::from(UNIT_PRICE_EGP),
            quantity,
        }
    }
}

/// The four color variants, in display order.
pub const VARIANTS: &[Variant] = &[
    Variant {
        id: "pearl-white-geometric",
        name_ar: "أبيض لؤلؤي هندسي",
        hex: "#f8fafc",
    },
    Variant {
        id: "golden-aqsa",
        name_ar: "ذهبي القدس",
        hex: "#b7791f",
    },
    Variant {
        id: "turquoise-mosque",
        name_ar: "فيروزي المسجد",
        hex: "#2dd4bf",
    },
    Variant {
        id: "pink-blossom",
        name_ar: "وردي زهري",
        hex: "#ec4899",
    },
];

/// What the gift set contains, for the product view.
pub const GIFT_SET_CONTENTS: &[(&str, &str)] = &[
    ("شنطه التراويح", "مقاسها كبير تتسع لمستلزمات الصلاة"),
    ("سجاده صلاه قطيفة", "خامة فاخرة وناعمة"),
    ("سبحة عدد 100 حبه", "تصميم أنيق"),
    ("مخطط رمضان", "لتنظيم العبادات والأذكار"),
    ("فاصل للمصحف", "لورد القرآن"),
    ("كارت الاهداء", "لإضافة لمسة شخصية"),
    ("كارت اذكار", "أذكار الصباح والمساء"),
];

/// Look up a variant by SKU code.
#[must_use]
pub fn find(id: &str) -> Option<&'static Variant> {
    VARIANTS.iter().find(|variant| variant.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_variants_share_one_price() {
        for variant in VARIANTS {
            assert_eq!(
                variant.to_cart_line(1).unit_price,
                Decimal::from(UNIT_PRICE_EGP)
            );
        }
    }

    #[test]
    fn lookup_by_sku() {
        assert_eq!(find("golden-aqsa").unwrap().name_ar, "ذهبي القدس");
        assert!(find("no-such-variant").is_none());
    }

    #[test]
    fn cart_line_snapshots_the_variant() {
        let line = find("pink-blossom").unwrap().to_cart_line(2);
        assert_eq!(line.product_id.as_str(), "pink-blossom");
        assert_eq!(line.quantity, 2);
        assert_eq!(line.line_total(), Decimal::from(700));
    }
}
