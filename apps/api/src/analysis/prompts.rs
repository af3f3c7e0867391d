// Prompt templates for CV analysis.

/// Persona sent as the system message.
pub const CV_ANALYSIS_SYSTEM: &str = "Tu es un assistant RH expert.";

/// Renders the analysis prompt. Both inputs are inserted verbatim in a single pass,
/// so braces or placeholder-like text inside them are never expanded.
pub fn build_prompt(cv_text: &str, job_title: &str) -> String {
    format!(
        r#"
Tu es un assistant expert en recrutement.

Voici un CV extrait d’un fichier PDF. Le poste ciblé est : "{job_title}".

Ta mission :
- Analyse objectivement le CV.
- Structure les informations de façon claire et organisée.
- Sois honnête : si le profil ne correspond pas au poste, dis-le.

Retourne un JSON structuré comme ceci :
{{
  "name": "Nom complet",
  "email": "Adresse email",
  "phone": "Téléphone",
  "language": "Langue du CV",
  "competences":[
  "Présente chaque compétence séparément. Ex :
- HTML
- CSS
- JavaScript
- ..."
  ],
  "langues": ["Français", "Anglais", ...],
  "formations": [
    {{
      "diplome": "Nom du diplôme",
      "ecole": "Établissement",
      "date": "Dates (ex: 2021-2023)"
    }}
  ],
  "experiences": [
    {{
      "poste": "Poste occupé",
      "entreprise": "Entreprise",
      "date": "Dates (ex: 2020-2022)"
    }}
  ],
  "autres_infos": ["Projets, publications, certifications, etc."],
  "analyse_du_profil": "Analyse critique du profil par rapport au poste visé, si le profil ne convient pas, suggere alors des formations et les competences qui peuvent aider le profil pour devenir illigible au job"
}}

Voici le contenu du CV :
{cv_text}
"#
    )
}
