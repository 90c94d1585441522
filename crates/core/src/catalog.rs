//! Closed label sets used by the admission forms.
//!
//! Every enumerated field is validated strictly against one of these sets;
//! unknown values are rejected. Each set is also exposed as `{value, label}`
//! pairs so the front end can render its selects from the same source.

use serde::Serialize;

/// A closed set of values with a stable wire/database code and a display label.
pub trait Catalog: Sized + Copy + 'static {
    /// Every member, in display order.
    fn all() -> &'static [Self];

    /// Stable code stored in the database and used on the wire.
    fn as_str(&self) -> &'static str;

    /// Human-readable label.
    fn label(&self) -> &'static str;

    /// Legacy codes accepted on input and mapped onto a canonical member.
    fn aliases() -> &'static [(&'static str, Self)] {
        &[]
    }

    /// Parse a code, ignoring surrounding whitespace and letter case.
    fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim().to_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|v| v.as_str() == wanted)
            .or_else(|| {
                Self::aliases()
                    .iter()
                    .find(|(alias, _)| *alias == wanted)
                    .map(|(_, v)| *v)
            })
    }

    /// All codes joined for error messages.
    fn codes() -> String {
        Self::all()
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `{value, label}` pairs for catalog endpoints.
    fn options() -> Vec<CatalogOption> {
        Self::all()
            .iter()
            .map(|v| CatalogOption {
                value: v.as_str(),
                label: v.label(),
            })
            .collect()
    }
}

/// One selectable entry of a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Declare a catalog enum together with its [`Catalog`] impl.
macro_rules! catalog_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($value:literal, $label:literal)),+ $(,)?
        }
        $(aliases { $($alias:literal => $target:ident),+ $(,)? })?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $crate::catalog::Catalog for $name {
            fn all() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            $(
                fn aliases() -> &'static [(&'static str, Self)] {
                    &[$(($alias, Self::$target)),+]
                }
            )?
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::catalog::Catalog::as_str(self))
            }
        }
    };
}

pub(crate) use catalog_enum;

catalog_enum! {
    /// Identity document type of an applicant.
    TipoDocumento {
        CedulaCiudadania => ("CC", "Cédula de ciudadanía"),
        TarjetaIdentidad => ("TI", "Tarjeta de identidad"),
        CedulaExtranjeria => ("CE", "Cédula de extranjería"),
        Pasaporte => ("PP", "Pasaporte"),
        RegistroCivil => ("RC", "Registro civil"),
    }
    aliases { "PA" => Pasaporte }
}

catalog_enum! {
    Genero {
        Masculino => ("MASCULINO", "Masculino"),
        Femenino => ("FEMENINO", "Femenino"),
        Otro => ("OTRO", "Otro"),
    }
}

catalog_enum! {
    EstadoCivil {
        Soltero => ("SOLTERO", "Soltero(a)"),
        Casado => ("CASADO", "Casado(a)"),
        UnionLibre => ("UNION_LIBRE", "Unión libre"),
        Divorciado => ("DIVORCIADO", "Divorciado(a)"),
        Viudo => ("VIUDO", "Viudo(a)"),
    }
}

catalog_enum! {
    GrupoSanguineo {
        APositivo => ("A+", "A+"),
        ANegativo => ("A-", "A-"),
        BPositivo => ("B+", "B+"),
        BNegativo => ("B-", "B-"),
        AbPositivo => ("AB+", "AB+"),
        AbNegativo => ("AB-", "AB-"),
        OPositivo => ("O+", "O+"),
        ONegativo => ("O-", "O-"),
    }
}

catalog_enum! {
    /// Track of the applicant's secondary-school credential.
    TipoBachillerato {
        Academico => ("ACADEMICO", "Académico"),
        Tecnico => ("TECNICO", "Técnico"),
        Comercial => ("COMERCIAL", "Comercial"),
        Pedagogico => ("PEDAGOGICO", "Pedagógico"),
        Industrial => ("INDUSTRIAL", "Industrial"),
        Agropecuario => ("AGROPECUARIO", "Agropecuario"),
        Otro => ("OTRO", "Otro"),
    }
}

catalog_enum! {
    Jornada {
        Manana => ("MANANA", "Mañana"),
        Tarde => ("TARDE", "Tarde"),
        Noche => ("NOCHE", "Noche"),
        Completa => ("COMPLETA", "Completa"),
        FinDeSemana => ("FIN_DE_SEMANA", "Fin de semana"),
    }
}

catalog_enum! {
    CaracterInstitucion {
        Publica => ("PUBLICA", "Pública"),
        Privada => ("PRIVADA", "Privada"),
    }
}

catalog_enum! {
    ModalidadIngreso {
        Regular => ("REGULAR", "Regular"),
        Transferencia => ("TRANSFERENCIA", "Transferencia"),
        Reingreso => ("REINGRESO", "Reingreso"),
        Convenio => ("CONVENIO", "Convenio"),
    }
}

catalog_enum! {
    /// Undergraduate programs open for admission.
    ProgramaAcademico {
        IngenieriaSistemas => ("INGENIERIA_SISTEMAS", "Ingeniería de Sistemas"),
        IngenieriaIndustrial => ("INGENIERIA_INDUSTRIAL", "Ingeniería Industrial"),
        IngenieriaCivil => ("INGENIERIA_CIVIL", "Ingeniería Civil"),
        IngenieriaElectronica => ("INGENIERIA_ELECTRONICA", "Ingeniería Electrónica"),
        AdministracionEmpresas => ("ADMINISTRACION_EMPRESAS", "Administración de Empresas"),
        ContaduriaPublica => ("CONTADURIA_PUBLICA", "Contaduría Pública"),
        Derecho => ("DERECHO", "Derecho"),
        Medicina => ("MEDICINA", "Medicina"),
        Enfermeria => ("ENFERMERIA", "Enfermería"),
        Psicologia => ("PSICOLOGIA", "Psicología"),
        Arquitectura => ("ARQUITECTURA", "Arquitectura"),
        LicenciaturaMatematicas => ("LICENCIATURA_MATEMATICAS", "Licenciatura en Matemáticas"),
    }
}

catalog_enum! {
    /// Documents an applicant can attach to a solicitud.
    TipoDocumentoAdjunto {
        Cedula => ("CEDULA", "Documento de identidad"),
        Diploma => ("DIPLOMA", "Diploma de bachiller"),
        Icfes => ("ICFES", "Resultado prueba Saber 11 (ICFES)"),
        Foto => ("FOTO", "Fotografía"),
        CertificadoNotas => ("CERTIFICADO_NOTAS", "Certificado de notas"),
        CertificadoEps => ("CERTIFICADO_EPS", "Certificado de afiliación a EPS"),
    }
}

impl TipoDocumentoAdjunto {
    /// Key used inside the `documentos` JSON map (lowercase code).
    pub fn key(&self) -> String {
        self.as_str().to_lowercase()
    }
}

/// Documents that must be attached before a solicitud can be submitted.
pub const DOCUMENTOS_REQUERIDOS: &[TipoDocumentoAdjunto] = &[
    TipoDocumentoAdjunto::Cedula,
    TipoDocumentoAdjunto::Diploma,
    TipoDocumentoAdjunto::Icfes,
];
