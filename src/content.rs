//! Hard-coded site content.

use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct SiteInfo {
    pub name: &'static str,
    pub tagline: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub address: &'static str,
    pub credit: &'static str,
}

pub static SITE: SiteInfo = SiteInfo {
    name: "Redlion",
    tagline: "Experience the untamed beauty of Namibia with our expertly guided safaris and tours.",
    phone: "+264 61 123 4567",
    email: "info@namibiasafari.com",
    address: "123 Independence Avenue, Windhoek, Namibia",
    credit: "Website build by SpecificXperts CC.",
};

#[derive(Serialize, Debug)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

pub static NAV_LINKS: &[NavLink] = &[
    NavLink { href: "#home", label: "Home" },
    NavLink { href: "#destinations", label: "Destinations" },
    NavLink { href: "#about", label: "About" },
    NavLink { href: "#gallery", label: "Gallery" },
    NavLink { href: "#services", label: "Services" },
    NavLink { href: "#reviews", label: "Reviews" },
    NavLink { href: "#faq", label: "FAQ" },
];

#[derive(Serialize, Debug)]
pub struct HeroSlide {
    pub image: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
}

pub static HERO_SLIDES: &[HeroSlide] = &[
    HeroSlide {
        image: "Images/1300x820.webp",
        title: "Experience Namibia",
        subtitle: "Discover the untamed beauty of Africa",
    },
    HeroSlide {
        image: "Images/11-november-in-namibia-damaraland59-2.jpg",
        title: "Unforgettable Safaris",
        subtitle: "Create memories that last a lifetime",
    },
    HeroSlide {
        image: "Images/Etosha/Etosha_elefant.jpg",
        title: "Wildlife Adventures",
        subtitle: "Get up close with African wildlife",
    },
];

#[derive(Serialize, Debug)]
pub struct DestinationProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub highlights: &'static [&'static str],
    pub activities: &'static [&'static str],
}

pub static DESTINATIONS: &[DestinationProfile] = &[
    DestinationProfile {
        id: "etosha",
        name: "Etosha National Park",
        description: "One of Africa's great wildlife parks, Etosha National Park is dominated by the vast Etosha salt pan. The park is home to hundreds of species of mammals, birds and reptiles, including several threatened and endangered species such as the black rhinoceros.",
        image: "https://images.unsplash.com/photo-1516426122078-c23e76319801",
        highlights: &[
            "Vast salt pan visible from space",
            "Abundant wildlife at waterholes",
            "Excellent game viewing opportunities",
            "Unique desert-adapted species",
        ],
        activities: &["Game drives", "Photography", "Bird watching", "Night drives"],
    },
    DestinationProfile {
        id: "skeleton-coast",
        name: "Skeleton Coast",
        description: "The Skeleton Coast is one of the most inhospitable but beautiful places on Earth. The cold Benguela Current brings in dense ocean fogs, while the desert winds create the highest dunes in the world.",
        image: "Images/Skeleton/skeleton.jpg",
        highlights: &["Shipwreck remains", "Desert-adapted wildlife", "Dramatic landscapes", "Remote wilderness"],
        activities: &["Scenic flights", "Beach walks", "Wildlife tracking", "Photography"],
    },
    DestinationProfile {
        id: "damaraland",
        name: "Damaraland",
        description: "A dramatic landscape of petrified forests, ancient valleys, and unique wildlife including desert-adapted elephants and black rhinos.",
        image: "Images/Damaraland/NAM_-_Damaraland1_-_wilderness.jpg",
        highlights: &[
            "Desert-adapted elephants",
            "Ancient rock art",
            "Dramatic red rock formations",
            "Traditional Damara communities",
        ],
        activities: &["Wildlife tracking", "Cultural visits", "Rock art tours", "Nature walks"],
    },
    DestinationProfile {
        id: "sossusvlei",
        name: "Sossusvlei",
        description: "Home to the world's highest sand dunes and the haunting Dead Vlei, Sossusvlei is a photographer's paradise and a must-visit destination in Namibia.",
        image: "Images/safari/Sossusvlei-Dune-Adventures_900X600.jpg",
        highlights: &["Big Daddy and Dune 45", "Dead Vlei", "Stunning sunrise views", "Star photography"],
        activities: &["Dune climbing", "Photography tours", "Hot air ballooning", "Nature walks"],
    },
];

#[derive(Serialize, Debug)]
pub struct Service {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub static SERVICES: &[Service] = &[
    Service {
        icon: "compass",
        title: "Custom-Tailored Safari Tours",
        description: "Each safari tour is designed to meet the unique preferences and interests of our guests, ensuring a personalized and memorable experience.",
    },
    Service {
        icon: "users",
        title: "Private Guided Safaris",
        description: "Exclusive tours led by experienced guides who provide in-depth insights into Namibia's diverse wildlife and ecosystems.",
    },
    Service {
        icon: "building",
        title: "Top-Tier Lodges and Camps",
        description: "We partner with the finest lodges offering exceptional comfort, exquisite dining, and world-class amenities.",
    },
    Service {
        icon: "tent",
        title: "Exclusive Wilderness Camps",
        description: "Stay in our exclusive wilderness camps, where you can enjoy the serenity of nature without sacrificing comfort.",
    },
    Service {
        icon: "balloon",
        title: "Hot Air Balloon Rides",
        description: "Experience the breathtaking landscapes of Namibia from above with our hot air balloon rides.",
    },
    Service {
        icon: "footprints",
        title: "Guided Bush Walks",
        description: "Explore the African bush on foot with our expert trackers and guides, learning about flora and fauna up close.",
    },
    Service {
        icon: "camera",
        title: "Wildlife Photography",
        description: "Specialized expeditions led by professional wildlife photographers, providing tips to capture the perfect shot.",
    },
    Service {
        icon: "leaf",
        title: "Conservation-Focused Tours",
        description: "Tours designed to promote wildlife conservation and support local communities while protecting Namibia's natural heritage.",
    },
    Service {
        icon: "heart",
        title: "Honeymoon Safaris",
        description: "Celebrate your love with a romantic honeymoon safari, complete with luxurious accommodations and exclusive experiences.",
    },
    Service {
        icon: "calendar",
        title: "Corporate Retreats",
        description: "Plan your next corporate retreat combining business with pleasure in a stunning natural setting.",
    },
    Service {
        icon: "mountain",
        title: "Family Adventure Packages",
        description: "Create lasting memories with our family adventure packages, offering fun and educational activities for all ages.",
    },
    Service {
        icon: "hotel",
        title: "Cultural Excursions",
        description: "Immerse yourself in Namibia's rich cultural heritage with guided visits to local communities and historical sites.",
    },
];

#[derive(Serialize, Debug)]
pub struct TeamMember {
    pub name: &'static str,
    pub role: &'static str,
    pub image: &'static str,
    pub bio: &'static str,
}

pub static TEAM: &[TeamMember] = &[
    TeamMember {
        name: "Tony Johnson",
        role: "Safari Guide",
        image: "Images/tony.jpg",
        bio: "With over 15 years of experience in Namibian wildlife, Tony brings unparalleled expertise to every safari.",
    },
    TeamMember {
        name: "David Muller",
        role: "Wildlife Photographer",
        image: "Images/portrait-of-a-confident-game-ranger-looking-at-a-g-2023-11-27-05-19-20-utc.jpg",
        bio: "Award-winning photographer specializing in African wildlife and landscapes.",
    },
    TeamMember {
        name: "Paulus Thompson",
        role: "Conservation Expert",
        image: "Images/Tarangire_119A.jpg",
        bio: "Dedicated to preserving Namibia's natural heritage through sustainable tourism.",
    },
    TeamMember {
        name: "Michael Nambinga",
        role: "Local Guide",
        image: "Images/solomon-ndlovu-winner.jpg",
        bio: "Born and raised in Namibia, Michael shares deep cultural insights with our guests.",
    },
];

#[derive(Serialize, Debug)]
pub struct Review {
    pub id: &'static str,
    pub name: &'static str,
    pub location: &'static str,
    pub rating: u8,
    pub text: &'static str,
    pub tour: &'static str,
    pub date: &'static str,
    pub image: &'static str,
}

pub static REVIEWS: &[Review] = &[
    Review {
        id: "1",
        name: "Sarah Thompson",
        location: "United Kingdom",
        rating: 5,
        text: "An absolutely incredible experience! The wildlife sightings in Etosha were beyond our expectations, and our guide was extremely knowledgeable. The accommodations were perfect, and the entire trip was well-organized.",
        tour: "Classic Namibia Safari",
        date: "March 2024",
        image: "https://images.unsplash.com/photo-1494790108377-be9c29b29330",
    },
    Review {
        id: "2",
        name: "Michael Chen",
        location: "Singapore",
        rating: 5,
        text: "The Skeleton Coast tour was a unique adventure. Seeing the desert-adapted wildlife and ancient shipwrecks was fascinating. Our guide made the experience even more special with his extensive knowledge.",
        tour: "Skeleton Coast Adventure",
        date: "February 2024",
        image: "https://images.unsplash.com/photo-1500648767791-00dcc994a43e",
    },
    Review {
        id: "3",
        name: "Emma Weber",
        location: "Germany",
        rating: 5,
        text: "The desert elephant tracking in Damaraland was the highlight of our trip. The landscapes were breathtaking, and the cultural experiences with the Himba people were authentic and respectful.",
        tour: "Damaraland Explorer",
        date: "January 2024",
        image: "https://images.unsplash.com/photo-1438761681033-6461ffad8d80",
    },
];

#[derive(Serialize, Debug)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

pub static FAQS: &[FaqEntry] = &[
    FaqEntry {
        question: "What is the best time to visit Namibia?",
        answer: "The best time to visit Namibia is during the dry season (May to October) when wildlife viewing is at its best. The weather is mild and animals gather around water sources, making them easier to spot.",
    },
    FaqEntry {
        question: "What vaccinations do I need for Namibia?",
        answer: "While no vaccinations are legally required to enter Namibia, it is recommended to be up-to-date with routine vaccinations. Consult your healthcare provider for personalized advice based on your medical history.",
    },
    FaqEntry {
        question: "What should I pack for a safari?",
        answer: "Essential items include lightweight, neutral-colored clothing, sturdy walking shoes, sun protection (hat, sunscreen, sunglasses), insect repellent, camera gear, and any personal medications. We will provide a detailed packing list upon booking.",
    },
    FaqEntry {
        question: "Are your safaris suitable for children?",
        answer: "Many of our safaris are family-friendly, but age restrictions may apply for certain activities. We can customize itineraries to accommodate families with children, ensuring a safe and enjoyable experience for all.",
    },
    FaqEntry {
        question: "What is included in the tour price?",
        answer: "Our tour prices typically include accommodation, meals as specified, professional guides, park fees, activities mentioned in the itinerary, and transportation. International flights, visa fees, travel insurance, and personal expenses are usually not included.",
    },
    FaqEntry {
        question: "How fit do I need to be for a safari?",
        answer: "Most of our safaris do not require exceptional fitness levels, as game viewing is primarily done from vehicles. However, some activities like dune climbing or nature walks require moderate fitness. We will clearly indicate any physical requirements for specific tours.",
    },
];

#[derive(Serialize, Debug)]
pub struct SliderImage {
    pub id: &'static str,
    pub src: &'static str,
    pub alt: &'static str,
}

/// A gallery tile. Opening it shows its three related slides.
#[derive(Serialize, Debug)]
pub struct GalleryImage {
    pub id: &'static str,
    pub src: &'static str,
    pub title: &'static str,
    pub location: &'static str,
    pub related: [SliderImage; 3],
}

pub static GALLERY: &[GalleryImage] = &[
    GalleryImage {
        id: "1",
        src: "Images/Damaraland/Damaraland-Elephants.webp",
        title: "Desert Elephant",
        location: "Damaraland",
        related: [
            SliderImage { id: "1-1", src: "Images/Damaraland/Ökenelefanter-i-Damaraland-1-1.jpg", alt: "Damaraland 1" },
            SliderImage { id: "1-2", src: "Images/Damaraland/damaraland-namibia-paisagem.jpg", alt: "Damaraland 2" },
            SliderImage { id: "1-3", src: "Images/Damaraland/DSC07527.jpg", alt: "Damaraland 3" },
        ],
    },
    GalleryImage {
        id: "2",
        src: "Images/safari/Sossus-Intro.jpg",
        title: "Sossusvlei Dunes",
        location: "Namib Desert",
        related: [
            SliderImage { id: "2-1", src: "Images/Namib/1280px-Sossusvlei_Dune_Namib_Desert_Namibia_Luca_Galuzzi_2004.jpg", alt: "Sossusvlei 1" },
            SliderImage { id: "2-2", src: "Images/safari/Sossusvlei-Dune-Adventures_900X600.jpg", alt: "Sossusvlei 2" },
            SliderImage { id: "2-3", src: "Images/Namib/Dead_Vlei_4.jpg", alt: "Sossusvlei 3" },
        ],
    },
    GalleryImage {
        id: "3",
        src: "Images/Etosha/118-etosha-wildlife.jpg",
        title: "Etosha Wildlife",
        location: "Etosha National Park",
        related: [
            SliderImage { id: "3-1", src: "Images/Etosha/Dry_Etosha_Pan.jpg", alt: "Etosha 1" },
            SliderImage { id: "3-2", src: "Images/Etosha/etosha_safari_camp_plain.jpg", alt: "Etosha 2" },
            SliderImage { id: "3-3", src: "Images/Etosha/16-wildebeests-etosha-thesanetravel.com-P1453842.jpg", alt: "Etosha 3" },
        ],
    },
    GalleryImage {
        id: "4",
        src: "Images/Kaokoland/himba-people-kaokoland-namibia-africa-RHPLF01080.jpg",
        title: "Himba People",
        location: "Kaokoland",
        related: [
            SliderImage { id: "4-1", src: "Images/Kaokoland/Kaokoland Experience (1).jpg", alt: "Kaokoland 1" },
            SliderImage { id: "4-2", src: "Images/Kaokoland/31536000.jpg", alt: "Kaokoland 2" },
            SliderImage { id: "4-3", src: "Images/Kaokoland/cropSerraCafema002_1280x1024.jpg", alt: "Kaokoland 3" },
        ],
    },
    GalleryImage {
        id: "5",
        src: "Images/Skeleton/otavi_shipwreck.jpg",
        title: "Shipwreck",
        location: "Skeleton Coast",
        related: [
            SliderImage { id: "5-1", src: "Images/Skeleton/pt-namibia_0.jpg", alt: "Skeleton Coast 1" },
            SliderImage { id: "5-2", src: "Images/Skeleton/d2rkhhucqlc51.jpg", alt: "Skeleton Coast 2" },
            SliderImage { id: "5-3", src: "Images/Skeleton/Ccecn07zeHl-mFjZx1LuWmQeyiKr5ur4Lb2SFFV7e8o.webp", alt: "Skeleton Coast 3" },
        ],
    },
    GalleryImage {
        id: "6",
        src: "Images/Fishriver/Fish-River-Canyon-7.jpg",
        title: "Fish River Canyon",
        location: "Southern Namibia",
        related: [
            SliderImage { id: "6-1", src: "Images/Fishriver/caption (9).jpg", alt: "Fish River Canyon 1" },
            SliderImage { id: "6-2", src: "Images/Fishriver/Fish-River-Canyon-7.jpg", alt: "Fish River Canyon 2" },
            SliderImage { id: "6-3", src: "Images/Fishriver/fish_river_canyon_tourist.jpeg", alt: "Fish River Canyon 3" },
        ],
    },
];

pub fn gallery_image(id: &str) -> Option<&'static GalleryImage> {
    GALLERY.iter().find(|image| image.id == id)
}

pub fn destination(id: &str) -> Option<&'static DestinationProfile> {
    DESTINATIONS.iter().find(|destination| destination.id == id)
}
