//! Built-in specialty table and per-role shortlists.
//!
//! Declaration order is significant: search results come back in this order.

use super::Specialty;

const PHYSICIAN: &[&str] = &["MD / DO", "NP", "PA"];
const ADMIN: &[&str] = &["Administrative"];

const fn clinical(
    id: &'static str,
    name: &'static str,
    synonyms: &'static [&'static str],
    roles: &'static [&'static str],
) -> Specialty {
    Specialty {
        id,
        name,
        synonyms,
        roles,
        category: None,
    }
}

const fn admin(
    id: &'static str,
    name: &'static str,
    synonyms: &'static [&'static str],
    category: &'static str,
) -> Specialty {
    Specialty {
        id,
        name,
        synonyms,
        roles: ADMIN,
        category: Some(category),
    }
}

pub const SPECIALTIES: &[Specialty] = &[
    // Core physician (MD/DO, NP, PA)
    clinical("family-med", "Family Medicine", &["primary care", "gp", "general practice"], PHYSICIAN),
    clinical("internal-med", "Internal Medicine", &["internist", "general medicine"], PHYSICIAN),
    clinical("pediatrics", "Pediatrics", &["peds", "pediatrician"], PHYSICIAN),
    clinical("emergency-med", "Emergency Medicine", &["er", "ed", "trauma"], PHYSICIAN),
    clinical("obgyn", "Obstetrics and Gynecology (OB/GYN)", &["womens health", "gynecology"], PHYSICIAN),
    clinical("general-surgery", "General Surgery", &["surgeon"], PHYSICIAN),
    clinical("orthopedic-surgery", "Orthopedic Surgery", &["ortho", "bones"], PHYSICIAN),
    clinical("cardiology", "Cardiology", &["heart", "cardiologist"], PHYSICIAN),
    clinical("interventional-cardiology", "Interventional Cardiology", &["cath lab", "pci"], &["MD / DO"]),
    clinical("cardiothoracic-surgery", "Cardiothoracic Surgery", &["heart surgery", "ct surgery"], &["MD / DO", "PA"]),
    clinical("pediatric-cardiology", "Pediatric Cardiology", &["congenital heart"], &["MD / DO", "NP"]),
    clinical("neurology", "Neurology", &["neuro", "brain"], PHYSICIAN),
    clinical("neurosurgery", "Neurosurgery", &["brain surgery"], PHYSICIAN),
    clinical("psychiatry", "Psychiatry", &["psych"], PHYSICIAN),
    clinical("radiology", "Radiology", &["imaging"], PHYSICIAN),
    clinical("anesthesiology", "Anesthesiology", &["anesthesia"], PHYSICIAN),
    clinical("pathology", "Pathology", &["lab"], PHYSICIAN),
    clinical("dermatology", "Dermatology", &["derm", "skin"], PHYSICIAN),
    clinical("ophthalmology", "Ophthalmology", &["eyes", "vision"], PHYSICIAN),
    clinical("ent", "Otolaryngology (ENT)", &["ear nose throat"], PHYSICIAN),
    clinical("urology", "Urology", &["bladder"], PHYSICIAN),
    clinical("oncology", "Oncology", &["cancer", "hem onc"], PHYSICIAN),
    clinical("geriatrics", "Geriatric Medicine", &["geriatrics", "elder care"], PHYSICIAN),
    clinical("palliative", "Hospice and Palliative Medicine", &["palliative", "hospice"], PHYSICIAN),
    clinical("hospital-med", "Hospital Medicine", &["hospitalist"], PHYSICIAN),
    clinical("urgent-care", "Urgent Care", &["walk-in"], PHYSICIAN),
    clinical("pmr", "Physical Medicine and Rehabilitation (PM&R)", &["physiatry"], PHYSICIAN),
    // Allied health
    clinical("resp-therapy", "Respiratory Therapy", &["rt", "breathing"], &["Respiratory Therapy"]),
    clinical("slp", "Speech-Language Pathology", &["speech therapist", "slp"], &["Speech-Language Pathology"]),
    clinical("ot", "Occupational Therapy", &["ot"], &["Occupational Therapy"]),
    clinical("audiology", "Audiology", &["hearing"], &["Audiology"]),
    clinical("nutrition", "Nutrition / Dietetics", &["dietitian", "rd"], &["Nutrition / Dietetics"]),
    clinical("athletic-training", "Athletic Training", &["atc"], &["Athletic Training"]),
    clinical("clin-psych", "Clinical Psychology", &["psychologist"], &["Clinical Psychology"]),
    clinical("genetic-counseling", "Genetic Counseling", &["genetics"], &["Genetic Counseling"]),
    clinical("cardiac-rehab", "Cardiac Rehab", &["cardiopulmonary"], &["DPT"]),
    // Administrative / non-clinical
    admin("um", "Utilization Management (UM)", &["um"], "Operations"),
    admin("pa", "Prior Authorization (PA)", &["auths"], "Operations"),
    admin("claims", "Claims Review", &["claims"], "Operations"),
    admin("case-mgmt", "Case Management", &["case manager"], "Operations"),
    admin("care-coord", "Care Coordination", &["coordinator"], "Operations"),
    admin("social-work", "Social Work", &["lmsw"], "Operations"),
    admin("benefits-admin", "Benefits Administration", &["hr"], "Insurance & Benefits"),
    admin("employer-health", "Employer Health Benefits", &[], "Insurance & Benefits"),
    admin("ins-broker", "Insurance Brokerage", &["broker"], "Insurance & Benefits"),
    admin("medicare-adv", "Medicare Advantage Operations", &["ma ops"], "Insurance & Benefits"),
    admin("medicaid-managed", "Medicaid Managed Care Ops", &["managed care"], "Insurance & Benefits"),
    admin("provider-rel", "Provider Relations", &[], "Operations"),
    admin("credentialing", "Credentialing", &[], "Operations"),
    admin("billing", "RCM / Billing", &["billing"], "RCM & Documentation"),
    admin("coding", "Coding (ICD-10/CPT)", &["coding"], "RCM & Documentation"),
    admin("compliance", "Compliance / Audit", &["audit"], "Quality & Compliance"),
    admin("quality-hedis", "Quality Improvement (HEDIS/Stars)", &["hedis", "stars"], "Quality & Compliance"),
    admin("pop-health", "Population Health", &[], "Quality & Compliance"),
    admin("cdi", "Clinical Documentation Integrity (CDI)", &["cdi"], "RCM & Documentation"),
    // Public health / research
    admin("epidemiology", "Epidemiology", &[], "Public Health & Research"),
    admin("biostats", "Biostatistics", &[], "Public Health & Research"),
    admin("health-policy", "Health Policy", &["policy"], "Public Health & Research"),
    admin("clin-research", "Clinical Research", &["research"], "Public Health & Research"),
    admin("trans-research", "Translational Research", &[], "Public Health & Research"),
    admin("health-econ", "Health Economics", &[], "Public Health & Research"),
    admin("outcomes-res", "Outcomes Research", &[], "Public Health & Research"),
    admin("impl-science", "Implementation Science", &[], "Public Health & Research"),
];

pub const ROLE_TOP_CHIPS: &[(&str, &[&str])] = &[
    (
        "MD / DO",
        &[
            "Family Medicine",
            "Internal Medicine",
            "Emergency Medicine",
            "Pediatrics",
            "Psychiatry",
            "General Surgery",
            "Cardiology",
            "OB/GYN",
            "Radiology",
            "Orthopedic Surgery",
        ],
    ),
    (
        "NP",
        &[
            "Family Medicine",
            "Internal Medicine",
            "Emergency Medicine",
            "Pediatrics",
            "Psychiatry",
            "OB/GYN",
            "Cardiology",
            "Oncology",
            "Geriatric Medicine",
            "Hospice and Palliative Medicine",
        ],
    ),
    (
        "PA",
        &[
            "Family Medicine",
            "Internal Medicine",
            "Emergency Medicine",
            "Orthopedic Surgery",
            "General Surgery",
            "Dermatology",
            "Cardiology",
            "Urgent Care",
            "Psychiatry",
            "Hospital Medicine",
        ],
    ),
    (
        "DDS",
        &[
            "General Dentistry",
            "Orthodontics",
            "Periodontics",
            "Endodontics",
            "Prosthodontics",
            "Oral and Maxillofacial Surgery",
            "Pediatric Dentistry",
        ],
    ),
    (
        "DPM",
        &[
            "General Podiatry",
            "Foot and Ankle Surgery",
            "Wound Care / Limb Salvage",
            "Diabetic Foot Care",
            "Sports Podiatry",
        ],
    ),
    (
        "OD",
        &[
            "General Optometry",
            "Low Vision Rehabilitation",
            "Contact Lens Specialist",
            "Ocular Disease",
            "Vision Therapy",
        ],
    ),
    (
        "DC",
        &[
            "General Chiropractic",
            "Sports Chiropractic",
            "Chiropractic Neurology",
            "Rehabilitation Chiropractic",
        ],
    ),
    (
        "DPT",
        &[
            "Orthopedic PT",
            "Neurologic PT",
            "Pediatric PT",
            "Geriatric PT",
            "Sports PT",
            "Pelvic Floor PT",
            "Cardiac Rehab",
            "Pulmonary Rehab",
        ],
    ),
    (
        "PharmD",
        &[
            "Ambulatory Care",
            "Hospital / Inpatient",
            "Critical Care",
            "Infectious Disease",
            "Oncology",
            "Transplant",
            "Psychiatric",
            "Community Pharmacy",
        ],
    ),
    (
        "RN",
        &[
            "Primary Care",
            "Critical Care / ICU",
            "Emergency Nursing",
            "Labor & Delivery",
            "OR / Perioperative",
            "Pediatrics Nursing",
            "Case Management",
        ],
    ),
    ("Respiratory Therapy", &["General RT", "Critical Care RT", "Pediatric RT"]),
    ("Speech-Language Pathology", &["Pediatric SLP", "Adult Neuro SLP", "Dysphagia"]),
    ("Occupational Therapy", &["Hand Therapy", "Pediatric OT", "Neuro Rehab"]),
    ("Audiology", &["Diagnostic Audiology", "Hearing Aids", "Vestibular"]),
    ("Nutrition / Dietetics", &["Clinical Nutrition", "Diabetes Education", "Renal Nutrition"]),
    ("Athletic Training", &["Sports Medicine", "Orthopedic Rehab"]),
    ("Clinical Psychology", &["CBT", "Child Psychology", "Health Psychology"]),
    ("Genetic Counseling", &["Cancer Genetics", "Prenatal Genetics", "Pediatric Genetics"]),
];
