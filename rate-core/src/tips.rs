//! Strategies for raising freelance rates.

pub const RATE_TIPS: [&str; 10] = [
    "Build a strong portfolio showcasing your best work",
    "Gain relevant certifications in your field",
    "Specialize in high-demand niches",
    "Improve your soft skills, especially communication",
    "Network and build relationships with potential clients",
    "Offer value-added services to justify higher rates",
    "Stay updated with the latest industry trends and technologies",
    "Gather and showcase client testimonials and case studies",
    "Develop a personal brand to stand out in the market",
    "Continuously track and analyze your performance metrics",
];

pub const PRO_TIP: &str = "Regularly reassess your rates based on your growing experience and \
    the value you provide. Raise your rates for new clients as your skills improve.";
