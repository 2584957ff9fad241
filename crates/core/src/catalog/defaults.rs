//! Bundled site copy. Every editable field ships with both languages.

use std::collections::BTreeMap;

use super::TextDefault;
use crate::content::ContentDomain::{
    About, Footer, Gallery, Hero, Nav, Notification, Services, Team, Testimonial,
};
use crate::content::{ContentDomain, ItemId, ListItem, LocalizedField, LocalizedText};

const fn text(
    domain: ContentDomain,
    field: &'static str,
    english: &'static str,
    indonesia: &'static str,
) -> TextDefault {
    TextDefault {
        domain,
        field,
        english,
        indonesia,
    }
}

pub static TEXTS: &[TextDefault] = &[
    text(Hero, "title", "Your Trusted Visa Partner in Bali", "Mitra Visa Terpercaya Anda di Bali"),
    text(
        Hero,
        "subtitle",
        "Tourist, business and stay permits handled end to end by a licensed local team.",
        "Visa turis, bisnis, dan izin tinggal diurus tuntas oleh tim lokal berlisensi.",
    ),
    text(Hero, "ctaPrimary", "Chat on WhatsApp", "Hubungi via WhatsApp"),
    text(Hero, "ctaSecondary", "See our services", "Lihat layanan kami"),
    text(
        Hero,
        "whatsappMessage",
        "Hello, I would like to ask about a visa.",
        "Halo, saya ingin bertanya tentang visa.",
    ),
    text(Nav, "home", "Home", "Beranda"),
    text(Nav, "services", "Services", "Layanan"),
    text(Nav, "about", "About", "Tentang Kami"),
    text(Nav, "team", "Team", "Tim"),
    text(Nav, "gallery", "Gallery", "Galeri"),
    text(Nav, "testimonials", "Testimonials", "Testimoni"),
    text(Nav, "contact", "Contact", "Kontak"),
    text(
        Footer,
        "tagline",
        "Helping travellers and expats stay in Indonesia with confidence.",
        "Membantu wisatawan dan ekspatriat tinggal di Indonesia dengan tenang.",
    ),
    text(
        Footer,
        "address",
        "Jl. Sunset Road No. 88, Kuta, Badung, Bali",
        "Jl. Sunset Road No. 88, Kuta, Badung, Bali",
    ),
    text(
        Footer,
        "hours",
        "Monday to Saturday, 09:00 to 17:00 WITA",
        "Senin sampai Sabtu, 09.00 sampai 17.00 WITA",
    ),
    text(Footer, "copyright", "All rights reserved.", "Hak cipta dilindungi."),
    text(Footer, "contactHeading", "Get in touch", "Hubungi kami"),
    text(Services, "heading", "Visa services", "Layanan visa"),
    text(
        Services,
        "subheading",
        "Pick your country to see the visa options we handle.",
        "Pilih negara Anda untuk melihat pilihan visa yang kami urus.",
    ),
    text(Services, "cta", "Ask about this visa", "Tanyakan visa ini"),
    text(About, "heading", "About us", "Tentang kami"),
    text(
        About,
        "body",
        "We are a Bali based agency guiding visitors through Indonesian immigration since 2015.",
        "Kami adalah agensi di Bali yang mendampingi pengunjung mengurus imigrasi Indonesia sejak 2015.",
    ),
    text(
        About,
        "mission",
        "Make every permit simple, transparent and on time.",
        "Menjadikan setiap izin sederhana, transparan, dan tepat waktu.",
    ),
    text(
        About,
        "vision",
        "The most trusted visa partner in Indonesia.",
        "Mitra visa paling tepercaya di Indonesia.",
    ),
    text(Team, "heading", "Meet the team", "Kenali tim kami"),
    text(
        Team,
        "subheading",
        "Licensed consultants who answer in your language.",
        "Konsultan berlisensi yang siap membantu dalam bahasa Anda.",
    ),
    text(Gallery, "heading", "Gallery", "Galeri"),
    text(
        Gallery,
        "subheading",
        "Moments with our clients around Bali.",
        "Momen bersama klien kami di sekitar Bali.",
    ),
    text(Testimonial, "heading", "What our clients say", "Kata klien kami"),
    text(
        Testimonial,
        "subheading",
        "Real stories from travellers we have helped.",
        "Cerita nyata dari para pelancong yang kami bantu.",
    ),
    text(Notification, "badge", "Notice", "Pemberitahuan"),
    text(Notification, "dismiss", "Close", "Tutup"),
    text(Notification, "readMore", "Read more", "Selengkapnya"),
];

struct VisaDefault {
    id: i64,
    country: (&'static str, &'static str),
    description: (&'static str, &'static str),
    processing_time: (&'static str, &'static str),
    image: &'static str,
}

static VISAS: &[VisaDefault] = &[
    VisaDefault {
        id: 1,
        country: ("Australia", "Australia"),
        description: (
            "Visitor and tourist visas for Australia, including document review.",
            "Visa kunjungan dan turis Australia, termasuk pemeriksaan dokumen.",
        ),
        processing_time: ("15 to 30 working days", "15 sampai 30 hari kerja"),
        image: "/images/visa/australia.webp",
    },
    VisaDefault {
        id: 2,
        country: ("Japan", "Jepang"),
        description: (
            "Single and multiple entry tourist visas for Japan.",
            "Visa turis Jepang sekali masuk dan beberapa kali masuk.",
        ),
        processing_time: ("5 to 7 working days", "5 sampai 7 hari kerja"),
        image: "/images/visa/japan.webp",
    },
    VisaDefault {
        id: 3,
        country: ("South Korea", "Korea Selatan"),
        description: (
            "Short term visit visas for South Korea.",
            "Visa kunjungan singkat ke Korea Selatan.",
        ),
        processing_time: ("7 to 10 working days", "7 sampai 10 hari kerja"),
        image: "/images/visa/korea.webp",
    },
    VisaDefault {
        id: 4,
        country: ("Schengen Area", "Kawasan Schengen"),
        description: (
            "Schengen tourist and business visas with appointment booking.",
            "Visa turis dan bisnis Schengen beserta pemesanan jadwal.",
        ),
        processing_time: ("15 working days", "15 hari kerja"),
        image: "/images/visa/schengen.webp",
    },
    VisaDefault {
        id: 5,
        country: ("Indonesia (KITAS)", "Indonesia (KITAS)"),
        description: (
            "Limited stay permits for investors, retirees and remote workers.",
            "Izin tinggal terbatas untuk investor, pensiunan, dan pekerja jarak jauh.",
        ),
        processing_time: ("10 to 14 working days", "10 sampai 14 hari kerja"),
        image: "/images/visa/kitas.webp",
    },
];

struct MemberDefault {
    id: i64,
    name: &'static str,
    role: (&'static str, &'static str),
    description: (&'static str, &'static str),
    image: &'static str,
}

static MEMBERS: &[MemberDefault] = &[
    MemberDefault {
        id: 1,
        name: "I Putu Arya",
        role: ("Founder and Director", "Pendiri dan Direktur"),
        description: (
            "Ten years of experience with Indonesian immigration.",
            "Sepuluh tahun pengalaman di bidang imigrasi Indonesia.",
        ),
        image: "/images/team/arya.webp",
    },
    MemberDefault {
        id: 2,
        name: "Ni Kadek Sari",
        role: ("Visa Consultant", "Konsultan Visa"),
        description: (
            "Handles Schengen and Japan applications.",
            "Menangani pengajuan visa Schengen dan Jepang.",
        ),
        image: "/images/team/sari.webp",
    },
    MemberDefault {
        id: 3,
        name: "Komang Adi",
        role: ("Client Relations", "Hubungan Klien"),
        description: (
            "Your first contact on WhatsApp, seven days a week.",
            "Kontak pertama Anda di WhatsApp, tujuh hari seminggu.",
        ),
        image: "/images/team/adi.webp",
    },
];

static GALLERY: &[(i64, &str, (&str, &str))] = &[
    (1, "/images/gallery/office.webp", ("Our office in Kuta", "Kantor kami di Kuta")),
    (2, "/images/gallery/clients.webp", ("Happy clients", "Klien yang puas")),
    (3, "/images/gallery/nyepi.webp", ("Nyepi celebration", "Perayaan Nyepi")),
];

/// `(id, name, origin, english, indonesia, rating)`
pub(super) static TESTIMONIALS: &[(i64, &str, &str, &str, &str, i64)] = &[
    (
        1,
        "Sarah Mitchell",
        "Australia",
        "They sorted my KITAS in under two weeks. Clear updates the whole way.",
        "KITAS saya selesai kurang dari dua minggu. Kabar perkembangannya selalu jelas.",
        5,
    ),
    (
        2,
        "Kenji Watanabe",
        "Japan",
        "Friendly team and very fast replies on WhatsApp.",
        "Timnya ramah dan balasan WhatsApp sangat cepat.",
        5,
    ),
    (
        3,
        "Dewi Lestari",
        "Indonesia",
        "My Schengen visa was approved on the first try.",
        "Visa Schengen saya disetujui pada percobaan pertama.",
        4,
    ),
];

fn pair((english, indonesia): (&str, &str)) -> LocalizedField {
    LocalizedField::Localized(LocalizedText::new(english, indonesia))
}

fn legacy(value: &str) -> LocalizedField {
    LocalizedField::Legacy(value.to_string())
}

fn item<const N: usize>(id: i64, fields: [(&str, LocalizedField); N]) -> ListItem {
    ListItem::new(
        ItemId::Number(id),
        fields
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    )
}

/// Default structured lists, keyed by domain.
pub fn lists() -> BTreeMap<ContentDomain, Vec<ListItem>> {
    let visas = VISAS
        .iter()
        .map(|v| {
            item(
                v.id,
                [
                    ("country", pair(v.country)),
                    ("description", pair(v.description)),
                    ("processingTime", pair(v.processing_time)),
                    ("image", legacy(v.image)),
                ],
            )
        })
        .collect();

    let members = MEMBERS
        .iter()
        .map(|m| {
            item(
                m.id,
                [
                    ("name", legacy(m.name)),
                    ("role", pair(m.role)),
                    ("description", pair(m.description)),
                    ("image", legacy(m.image)),
                ],
            )
        })
        .collect();

    let images = GALLERY
        .iter()
        .map(|(id, src, alt)| item(*id, [("src", legacy(src)), ("alt", pair(*alt))]))
        .collect();

    let testimonials = TESTIMONIALS
        .iter()
        .map(|(id, name, origin, english, indonesia, rating)| {
            item(
                *id,
                [
                    ("name", legacy(name)),
                    ("origin", legacy(origin)),
                    ("text", pair((*english, *indonesia))),
                    ("rating", legacy(&rating.to_string())),
                ],
            )
        })
        .collect();

    BTreeMap::from([
        (Services, visas),
        (Team, members),
        (Gallery, images),
        (Testimonial, testimonials),
    ])
}
